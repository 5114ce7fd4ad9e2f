//! Support desk contact points.

/// How a contact is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
    Telegram,
    WhatsApp,
}

/// A way to reach the support team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportContact {
    pub kind: ContactKind,
    pub label: &'static str,
    /// Link handed to the platform opener (`tel:`, `mailto:` or web).
    pub uri: &'static str,
}

impl SupportContact {
    /// Whether the link leaves the terminal for a web page.
    pub fn is_external(&self) -> bool {
        self.uri.starts_with("https://")
    }
}

pub static SUPPORT_CONTACTS: [SupportContact; 4] = [
    SupportContact {
        kind: ContactKind::Phone,
        label: "Phone",
        uri: "tel:+911234567890",
    },
    SupportContact {
        kind: ContactKind::Email,
        label: "Email Support",
        uri: "mailto:support@example.com",
    },
    SupportContact {
        kind: ContactKind::Telegram,
        label: "Telegram",
        uri: "https://t.me/yourchannel",
    },
    SupportContact {
        kind: ContactKind::WhatsApp,
        label: "WhatsApp",
        uri: "https://wa.me/911234567890",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_links() {
        let external: Vec<_> = SUPPORT_CONTACTS
            .iter()
            .filter(|c| c.is_external())
            .map(|c| c.kind)
            .collect();
        assert_eq!(external, vec![ContactKind::Telegram, ContactKind::WhatsApp]);
        assert!(SUPPORT_CONTACTS[0].uri.starts_with("tel:"));
        assert!(SUPPORT_CONTACTS[1].uri.starts_with("mailto:"));
    }
}
