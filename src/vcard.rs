//! vCard 3.0 serialization for the collected list.
//!
//! Values are written verbatim: no escaping and no line folding. Every line
//! ends in CRLF and the per-contact blocks are concatenated back to back.

use crate::models::Contact;

/// MIME type handed to the delivery sink alongside the serialized text.
pub const VCARD_MIME: &str = "text/vcard;charset=utf-8";

/// Formatted name used when a contact has neither a name nor a number.
const UNKNOWN_NAME: &str = "Unknown";

/// Serialize every contact in list order. An empty slice yields an empty
/// string, which callers treat as "nothing to export".
pub fn build_vcard(contacts: &[Contact]) -> String {
    let mut out = String::with_capacity(contacts.len() * 96);
    for contact in contacts {
        write_card(&mut out, contact);
    }
    out
}

/// Serialize a single contact as one `BEGIN:VCARD ... END:VCARD` block.
pub fn format_card(contact: &Contact) -> String {
    let mut out = String::new();
    write_card(&mut out, contact);
    out
}

fn write_card(out: &mut String, contact: &Contact) {
    let full_name = contact.full_name();
    let number = contact.number.trim();

    let formatted = if !full_name.is_empty() {
        full_name.as_str()
    } else if !number.is_empty() {
        number
    } else {
        UNKNOWN_NAME
    };

    let structured = if full_name.is_empty() {
        ";;;".to_string()
    } else {
        format!(";{full_name};;")
    };

    out.push_str("BEGIN:VCARD\r\nVERSION:3.0\r\n");
    out.push_str(&format!("N:{structured}\r\n"));
    out.push_str(&format!("FN:{formatted}\r\n"));
    out.push_str(&format!("TEL;TYPE=CELL:{number}\r\n"));
    out.push_str("END:VCARD\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactDraft;

    fn contact(prefix: &str, name: &str, number: &str) -> Contact {
        Contact::from_draft(&ContactDraft::new(prefix, name, number))
    }

    #[test]
    fn prefix_and_name_form_the_full_name() {
        let card = format_card(&contact("HHBU", "Peter", "22233322"));
        assert_eq!(
            card,
            "BEGIN:VCARD\r\nVERSION:3.0\r\nN:;HHBUPeter;;\r\nFN:HHBUPeter\r\nTEL;TYPE=CELL:22233322\r\nEND:VCARD\r\n"
        );
    }

    #[test]
    fn number_stands_in_for_missing_name() {
        let card = format_card(&contact("", "", "555"));
        assert!(card.contains("\r\nN:;;;\r\n"));
        assert!(card.contains("\r\nFN:555\r\n"));
        assert!(card.contains("\r\nTEL;TYPE=CELL:555\r\n"));
    }

    #[test]
    fn unknown_when_everything_is_empty() {
        let card = format_card(&contact("", "", ""));
        assert!(card.contains("\r\nFN:Unknown\r\n"));
        assert!(card.contains("\r\nTEL;TYPE=CELL:\r\n"));
    }

    #[test]
    fn name_without_prefix_is_used_alone() {
        let card = format_card(&contact("", "Ann", ""));
        assert!(card.contains("\r\nN:;Ann;;\r\n"));
        assert!(card.contains("\r\nFN:Ann\r\n"));
    }

    #[test]
    fn empty_list_serializes_to_nothing() {
        assert_eq!(build_vcard(&[]), "");
    }

    #[test]
    fn one_block_per_contact_in_list_order() {
        let contacts = vec![
            contact("", "First", "1"),
            contact("", "Second", "2"),
            contact("", "Third", "3"),
        ];
        let text = build_vcard(&contacts);

        assert_eq!(text.matches("BEGIN:VCARD").count(), 3);
        assert_eq!(text.matches("END:VCARD\r\n").count(), 3);
        let first = text.find("FN:First").unwrap();
        let second = text.find("FN:Second").unwrap();
        let third = text.find("FN:Third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn text_passes_through_unescaped() {
        let card = format_card(&contact("", "Müller, Jörg", "+49 30 123"));
        assert!(card.contains("FN:Müller, Jörg\r\n"));
        assert!(card.contains("TEL;TYPE=CELL:+49 30 123\r\n"));
    }
}
