use studydesk_types::models::Language;
use tracing::debug;

/// Source of every user-facing string. Placeholders look like `{name}`.
pub trait Translate: Send + Sync {
    fn t(&self, key: &str, replacements: &[(&str, &str)]) -> String;
}

/// (key, English, Dutch)
const ENTRIES: &[(&str, &str, &str)] = &[
    ("admin_dashboard", "Admin Dashboard", "Beheerdersdashboard"),
    ("users", "Users", "Gebruikers"),
    ("total_users", "Total Users", "Totaal gebruikers"),
    ("refresh_data", "Refresh", "Vernieuwen"),
    ("admin_search_placeholder", "Search by name or email...", "Zoek op naam of e-mail..."),
    ("education_level", "Education level", "Onderwijsniveau"),
    ("last_login", "Last login", "Laatst ingelogd"),
    ("status", "Status", "Status"),
    ("actions", "Actions", "Acties"),
    ("active", "Active", "Actief"),
    ("disabled", "Disabled", "Uitgeschakeld"),
    ("enable_user", "Enable user", "Gebruiker inschakelen"),
    ("disable_user", "Disable user", "Gebruiker uitschakelen"),
    ("not_available", "N/A", "n.v.t."),
    (
        "confirm_disable_user",
        "Are you sure you want to disable {name}?",
        "Weet je zeker dat je {name} wilt uitschakelen?",
    ),
    (
        "confirm_enable_user",
        "Are you sure you want to enable {name}?",
        "Weet je zeker dat je {name} wilt inschakelen?",
    ),
    ("user_status_updated", "User status updated.", "Gebruikersstatus bijgewerkt."),
    (
        "error_user_status_update",
        "Could not update the user status.",
        "Kon de gebruikersstatus niet bijwerken.",
    ),
    ("error_fetch_users", "Failed to fetch users.", "Ophalen van gebruikers mislukt."),
    ("send_broadcast", "Send broadcast", "Bericht versturen"),
    (
        "broadcast_message_placeholder",
        "Type a message for all users...",
        "Typ een bericht voor alle gebruikers...",
    ),
    ("send_message_button", "Send", "Versturen"),
    ("broadcast_success", "Broadcast sent!", "Bericht verstuurd!"),
    (
        "error_broadcast_failed",
        "Failed to send the broadcast.",
        "Versturen van het bericht mislukt.",
    ),
    (
        "error_broadcast_empty",
        "Broadcast message cannot be empty.",
        "Het bericht mag niet leeg zijn.",
    ),
    ("notifications_title", "Notifications", "Meldingen"),
    ("no_notifications", "No notifications yet", "Nog geen meldingen"),
];

/// Built-in English and Dutch strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog {
    language: Language,
}

impl Catalog {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        ENTRIES
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, en, nl)| match self.language {
                Language::En => *en,
                Language::Nl => *nl,
            })
    }
}

impl Translate for Catalog {
    fn t(&self, key: &str, replacements: &[(&str, &str)]) -> String {
        let Some(template) = self.lookup(key) else {
            debug!("No translation for '{}'", key);
            return key.to_string();
        };

        replacements
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_placeholders() {
        let en = Catalog::new(Language::En);
        assert_eq!(
            en.t("confirm_disable_user", &[("name", "Ann")]),
            "Are you sure you want to disable Ann?"
        );

        let nl = Catalog::new(Language::Nl);
        assert_eq!(
            nl.t("confirm_enable_user", &[("name", "Bob")]),
            "Weet je zeker dat je Bob wilt inschakelen?"
        );
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let en = Catalog::default();
        assert_eq!(en.t("havo", &[]), "havo");
    }

    #[test]
    fn every_key_is_translated_in_both_languages() {
        for (key, en, nl) in ENTRIES {
            assert!(!en.is_empty(), "{key} missing English");
            assert!(!nl.is_empty(), "{key} missing Dutch");
        }
    }
}
