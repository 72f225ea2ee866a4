//! The static document a build-time crawler scans to learn which forms the site accepts.
//!
//! Fields the crawler does not find here are dropped by the form backend, so the document is
//! generated from [`FORMS`](crate::form::FORMS) and never edited by hand.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

use maud::{html, Markup, DOCTYPE};
use scraper::{Html as Document, Selector};

use crate::{error::Error, form::FieldSet, render::FieldInput};

pub fn render(forms: &[FieldSet]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="robots" content="noindex";
                title { "Form declarations" }
            }
            body {
                @for form in forms {
                    form name=(form.form_name) data-netlify="true" hidden {
                        @for field in form.fields {
                            (FieldInput::bare(field))
                        }
                    }
                }
            }
        }
    }
}

pub fn write(path: &Path, forms: &[FieldSet]) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render(forms).into_string())?;
    log::info!("wrote {} form declarations to {}", forms.len(), path.display());
    Ok(())
}

/// Form names and their field names, as a crawler would discover them.
pub fn scan(html: &str) -> BTreeMap<String, BTreeSet<String>> {
    let document = Document::parse_document(html);
    let form_selector = Selector::parse("form[name]").expect("static selector");
    let field_selector =
        Selector::parse("input[name], textarea[name], select[name]").expect("static selector");

    let mut forms: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for form in document.select(&form_selector) {
        let Some(form_name) = form.value().attr("name") else {
            continue;
        };
        let fields = forms.entry(form_name.to_string()).or_default();
        for field in form.select(&field_selector) {
            if let Some(name) = field.value().attr("name") {
                fields.insert(name.to_string());
            }
        }
    }
    forms
}

/// Verifies the manifest declares `form` with at least the fields it submits.
pub fn check(html: &str, form: &FieldSet) -> Result<(), Error> {
    let scanned = scan(html);
    let declared = scanned
        .get(form.form_name)
        .ok_or_else(|| Error::MissingForm(form.form_name.to_string()))?;

    let missing: Vec<String> = form
        .names()
        .filter(|name| !declared.contains(*name))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        let extra = declared.len().saturating_sub(form.fields.len());
        if extra > 0 {
            log::debug!("{} declares {} fields never submitted", form.form_name, extra);
        }
        Ok(())
    } else {
        Err(Error::ManifestMismatch {
            form: form.form_name.to_string(),
            missing,
        })
    }
}
