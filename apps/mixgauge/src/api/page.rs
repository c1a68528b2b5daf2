//! Server-rendered single-page form.

use axum::response::Html;
use mixgauge_core::{Assessment, MixField, MixForm, ModelSlot, Outcome};

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.6rem}input{width:100%}\
.success{color:#1b5e20}.warning{color:#8a6d00}.error{color:#b71c1c}";

/// Minimal HTML escaping for text and attribute values.
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

/// Render the form pre-filled with `values`, plus the result of the last
/// trigger if there was one.
pub fn render_page(values: &MixForm, result: Option<&Assessment>, model: &ModelSlot) -> Html<String> {
    render(values, result.map(result_section), model)
}

/// Render the form with a request-level error in the outcome area.
pub fn render_rejection(values: &MixForm, message: &str, model: &ModelSlot) -> Html<String> {
    let section = format!(
        "<section id=\"result\">\n<p class=\"error\" id=\"outcome\">{}</p>\n</section>\n",
        escape(message)
    );
    render(values, Some(section), model)
}

fn result_section(assessment: &Assessment) -> String {
    let mut html = String::from("<section id=\"result\">\n");
    for adjustment in &assessment.adjustments {
        html.push_str(&format!(
            "<p class=\"warning\">{}</p>\n",
            escape(&adjustment.to_string())
        ));
    }
    for warning in &assessment.warnings {
        let class = if warning.is_blocking() { "error" } else { "warning" };
        html.push_str(&format!(
            "<p class=\"{class}\">{}</p>\n",
            escape(&warning.to_string())
        ));
    }
    let class = match assessment.outcome {
        Outcome::Predicted(_) => "success",
        Outcome::Blocked | Outcome::Failed(_) => "error",
    };
    html.push_str(&format!(
        "<p class=\"{class}\" id=\"outcome\">{}</p>\n",
        escape(&assessment.message())
    ));
    if let Some(strength) = assessment.outcome.strength() {
        html.push_str(&format!(
            "<p>Strength class: {}</p>\n",
            escape(strength.class().as_str())
        ));
    }
    html.push_str("</section>\n");
    html
}

fn render(values: &MixForm, section: Option<String>, model: &ModelSlot) -> Html<String> {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Concrete Strength Predictor</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str("<h1>Concrete Strength Predictor</h1>\n");
    html.push_str("<p>Enter concrete mix properties:</p>\n");

    if let Some(err) = model.load_error() {
        html.push_str(&format!(
            "<p class=\"error\" id=\"model-error\">Model unavailable: {}</p>\n",
            escape(&err.to_string())
        ));
    }

    html.push_str("<form method=\"post\" action=\"/\">\n");
    for field in MixField::ALL {
        let spec = field.spec();
        html.push_str(&format!(
            "<label for=\"{key}\">{label}</label>\n\
             <input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" required>\n",
            key = spec.key,
            label = escape(&spec.display_label()),
            min = spec.min,
            max = spec.max,
            step = spec.step,
            value = values.bounded(field),
        ));
    }
    let disabled = if model.is_ready() { "" } else { " disabled" };
    html.push_str(&format!(
        "<p><button type=\"submit\"{disabled}>Predict Strength</button></p>\n</form>\n"
    ));

    if let Some(section) = section {
        html.push_str(&section);
    }

    html.push_str("<aside>\n<h2>About</h2>\n<p>Predicts the compressive strength of a concrete mix \
                   from its proportions using a pre-trained regression model. \
                   Best used with realistic mix proportions.</p>\n</aside>\n");
    html.push_str("</body>\n</html>\n");

    Html(html)
}
