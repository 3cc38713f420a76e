use scraper::{ElementRef, Html, Selector};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlForm {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl HtmlForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        let mut replaced = false;
        self.fields.retain_mut(|(key, current)| {
            if key != name {
                return true;
            }
            if replaced {
                return false;
            }
            *current = value.to_string();
            replaced = true;
            true
        });
        if !replaced {
            self.fields.push((name.to_string(), value.to_string()));
        }
    }

    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
    }
}

pub fn first_script_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").expect("script selector is valid");
    let script = document.select(&selector).next()?;
    let text = script.text().collect::<String>();
    if text.trim().is_empty() {
        return None;
    }
    Some(text)
}

pub fn first_form(html: &str, page_url: &str) -> Option<HtmlForm> {
    let document = Html::parse_document(html);
    let form_sel = Selector::parse("form").expect("form selector is valid");
    let field_sel = Selector::parse("input, select, textarea").expect("field selector is valid");

    let form = document.select(&form_sel).next()?;
    let action = resolve_url(page_url, form.value().attr("action").unwrap_or(""));

    let mut fields = Vec::new();
    for field in form.select(&field_sel) {
        let Some(name) = field.value().attr("name").filter(|name| !name.is_empty()) else {
            continue;
        };
        if let Some(value) = field_value(&field) {
            fields.push((name.to_string(), value));
        }
    }

    Some(HtmlForm { action, fields })
}

pub fn resolve_url(base_url: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base_url.to_string();
    }
    if relative.starts_with("http://") || relative.starts_with("https://") {
        return relative.to_string();
    }
    if let Ok(base) = Url::parse(base_url) {
        if let Ok(resolved) = base.join(relative) {
            return resolved.to_string();
        }
    }
    relative.to_string()
}

// Value a browser would submit for the control, `None` for controls it skips.
fn field_value(field: &ElementRef<'_>) -> Option<String> {
    let element = field.value();
    match element.name() {
        "textarea" => Some(field.text().collect()),
        "select" => {
            let option_sel = Selector::parse("option").expect("option selector is valid");
            let options = field.select(&option_sel).collect::<Vec<_>>();
            let chosen = options
                .iter()
                .find(|option| option.value().attr("selected").is_some())
                .or_else(|| options.first())?;
            Some(
                chosen
                    .value()
                    .attr("value")
                    .map(String::from)
                    .unwrap_or_else(|| chosen.text().collect::<String>().trim().to_string()),
            )
        }
        _ => {
            let kind = element.attr("type").unwrap_or("text").to_ascii_lowercase();
            match kind.as_str() {
                "submit" | "button" | "image" | "reset" | "file" => None,
                "checkbox" | "radio" => element
                    .attr("checked")
                    .map(|_| element.attr("value").unwrap_or("on").to_string()),
                _ => Some(element.attr("value").unwrap_or("").to_string()),
            }
        }
    }
}
