use std::borrow::Cow;

use itertools::Itertools;

use crate::workflow::{DisplayRecord, ResultSet};

/// How field values are written into the feedback document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Escaping {
    /// Values are interpolated as they are. A value containing `<` or `'`
    /// produces a malformed document.
    #[default]
    Verbatim,

    /// Reserved markup characters are replaced by entity references.
    Markup,
}

impl Escaping {
    fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Escaping::Verbatim => Cow::Borrowed(value),
            Escaping::Markup => quick_xml::escape::escape(value),
        }
    }
}

/// Renders the result set into the single-line `<items>` document the host reads.
pub fn render(results: &ResultSet, escaping: Escaping) -> String {
    let items = results
        .records()
        .iter()
        .map(|record| item(record, escaping))
        .join("");

    format!("<items>{items}</items>")
}

fn item(record: &DisplayRecord, escaping: Escaping) -> String {
    let valid = if record.valid { "yes" } else { "no" };

    format!(
        "<item uidid='{}' valid='{}' autocomplete='{}' type='{}'>\
         <arg>{}</arg><title>{}</title><subtitle>{}</subtitle><icon>{}</icon>\
         </item>",
        escaping.apply(&record.uid),
        valid,
        escaping.apply(&record.autocomplete),
        escaping.apply(&record.kind),
        escaping.apply(&record.arg),
        escaping.apply(&record.title),
        escaping.apply(&record.subtitle),
        escaping.apply(&record.icon),
    )
}
