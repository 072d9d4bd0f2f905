//! Internationalization (i18n) support
//!
//! Built-in label and month-name tables for the languages the templates
//! ship with. Selected by the `language` key in _config.yml.

/// Internationalization handler
#[derive(Debug, Clone)]
pub struct I18n {
    /// Current language
    language: String,
}

impl I18n {
    /// Create a new i18n handler
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Look up a UI label, falling back to English
    pub fn t(&self, key: &str) -> &'static str {
        lookup(&self.language, key).unwrap_or_else(|| lookup("en", key).unwrap_or(""))
    }

    /// Abbreviated month name (1-based month number)
    pub fn month_abbrev(&self, month: u32) -> &'static str {
        let table = match self.language.as_str() {
            "pt" | "pt-br" => &MONTHS_ABBREV_PT,
            _ => &MONTHS_ABBREV_EN,
        };
        table[(month as usize - 1).min(11)]
    }

    /// Full month name (1-based month number)
    pub fn month_name(&self, month: u32) -> &'static str {
        let table = match self.language.as_str() {
            "pt" | "pt-br" => &MONTHS_FULL_PT,
            _ => &MONTHS_FULL_EN,
        };
        table[(month as usize - 1).min(11)]
    }
}

fn lookup(language: &str, key: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match language {
        "pt" | "pt-br" => &LABELS_PT,
        "en" => &LABELS_EN,
        _ => return None,
    };
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

const LABELS_EN: [(&str, &str); 7] = [
    ("load_more", "Load more posts"),
    ("prev_post", "Previous post"),
    ("next_post", "Next post"),
    ("edited_on", "edited on"),
    ("reading_time", "min"),
    ("not_found", "Content not found"),
    ("exit_preview", "Exit preview mode"),
];

const LABELS_PT: [(&str, &str); 7] = [
    ("load_more", "Carregar mais posts"),
    ("prev_post", "Post anterior"),
    ("next_post", "Próximo post"),
    ("edited_on", "editado em"),
    ("reading_time", "min"),
    ("not_found", "Conteúdo não encontrado"),
    ("exit_preview", "Sair do modo Preview"),
];

const MONTHS_ABBREV_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_FULL_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_ABBREV_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const MONTHS_FULL_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let en = I18n::new("en");
        assert_eq!(en.t("load_more"), "Load more posts");

        let pt = I18n::new("pt");
        assert_eq!(pt.t("load_more"), "Carregar mais posts");
        assert_eq!(pt.t("prev_post"), "Post anterior");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let i18n = I18n::new("fr");
        assert_eq!(i18n.t("load_more"), "Load more posts");
    }

    #[test]
    fn test_month_names() {
        let en = I18n::new("en");
        assert_eq!(en.month_abbrev(3), "Mar");
        assert_eq!(en.month_name(1), "January");

        let pt = I18n::new("pt");
        assert_eq!(pt.month_abbrev(3), "mar");
        assert_eq!(pt.month_name(2), "fevereiro");
    }
}
