//! HTML rendering of an explanation
//!
//! Produces a self-contained HTML fragment: headline with the predicted
//! label, the explained text, and one contribution bar per attributed token.

use polarity_core::{Sentiment, TokenWeight};
use std::fmt::Write;

/// Render an explanation as an HTML fragment.
///
/// Bar widths are scaled relative to the largest attribution magnitude;
/// positive contributions and negative contributions get distinct classes so
/// a stylesheet can color them apart.
pub fn render_html(sentiment: Sentiment, tokens: &[TokenWeight], text: &str) -> String {
    let mut html = String::with_capacity(512);

    html.push_str("<div class=\"polarity-explanation\">\n");
    let _ = writeln!(
        html,
        "  <div class=\"polarity-headline\">Prediction: {}</div>",
        sentiment
    );
    let _ = writeln!(
        html,
        "  <div class=\"polarity-text\">{}</div>",
        escape(text)
    );

    if tokens.is_empty() {
        html.push_str("  <div class=\"polarity-empty\">No attributable tokens</div>\n");
    } else {
        let max_magnitude = tokens
            .iter()
            .map(|t| t.weight.abs())
            .fold(f64::MIN_POSITIVE, f64::max);

        html.push_str("  <div class=\"polarity-tokens\">\n");
        for token in tokens {
            let direction = if token.weight >= 0.0 {
                "positive"
            } else {
                "negative"
            };
            let width = (token.weight.abs() / max_magnitude * 100.0).round() as u32;
            let _ = writeln!(
                html,
                "    <div class=\"polarity-token\">\
                 <span class=\"word\">{}</span>\
                 <div class=\"bar {direction}\" style=\"width: {width}%\"></div>\
                 <span class=\"weight\">{:+.4}</span></div>",
                escape(&token.word),
                token.weight
            );
        }
        html.push_str("  </div>\n");
    }

    html.push_str("</div>\n");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_block_elements_and_tokens() {
        let tokens = vec![
            TokenWeight {
                word: "terrible".to_string(),
                weight: -0.42,
            },
            TokenWeight {
                word: "film".to_string(),
                weight: 0.05,
            },
        ];
        let html = render_html(Sentiment::Negative, &tokens, "terrible film");

        assert!(html.contains("<div"));
        assert!(html.contains("terrible"));
        assert!(html.contains("Prediction: Negative"));
        assert!(html.contains("class=\"bar negative\""));
        assert!(html.len() > 100);
    }

    #[test]
    fn test_render_escapes_markup_in_tokens() {
        let tokens = vec![TokenWeight {
            word: "<script>".to_string(),
            weight: 1.0,
        }];
        let html = render_html(Sentiment::Positive, &tokens, "<script> alert");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_empty_explanation() {
        let html = render_html(Sentiment::Negative, &[], "");
        assert!(html.contains("No attributable tokens"));
        assert!(html.contains("<div"));
    }
}
