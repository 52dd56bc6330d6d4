//! `otpauth://` URI construction and QR filename derivation
//!
//! Authenticator apps consume enrollment parameters through the de facto
//! `otpauth://` URI scheme. Query field order is kept fixed because some
//! consumers are order-sensitive.

use crate::backup::ServiceEntry;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes escaped in URI components: everything outside `[A-Za-z0-9-._~]`.
/// Space is excluded from the set and mapped to `+` afterwards.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Form-style percent-encode a single URI component (space becomes `+`).
pub fn encode_component(value: &str) -> String {
    // A literal `+` is escaped to %2B before the space substitution.
    utf8_percent_encode(value, COMPONENT)
        .to_string()
        .replace(' ', "+")
}

/// Build the `otpauth://` enrollment URI for one service.
///
/// Absent account/issuer fields contribute empty components. The secret is
/// passed through unvalidated; a malformed secret is the scanning app's
/// problem.
pub fn totp_uri(service: &ServiceEntry) -> String {
    let name = encode_component(&service.name);
    let account = encode_component(service.otp.account.as_deref().unwrap_or(""));
    let secret = encode_component(&service.secret);
    let issuer = encode_component(service.otp.issuer.as_deref().unwrap_or(""));
    let algorithm = encode_component(&service.otp.algorithm);
    let digits = service.otp.digits;
    let period = service.otp.period;

    format!(
        "otpauth://totp/{name}:{account}?secret={secret}&issuer={issuer}&algorithm={algorithm}&digits={digits}&period={period}"
    )
}

/// Strip every non-alphanumeric character (Unicode-aware), separators included.
pub fn sanitize(candidate: &str) -> String {
    candidate.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Derive the image file stem for a service.
///
/// The candidate is `{name}_{account}_{issuer}` where account and issuer are
/// the percent-encoded values, or the markers `no_account` / `no_issuer`
/// when empty. Services differing only in punctuation can collapse to the
/// same stem; the later one overwrites.
pub fn qr_filename(service: &ServiceEntry) -> String {
    let account = encode_component(service.otp.account.as_deref().unwrap_or(""));
    let issuer = encode_component(service.otp.issuer.as_deref().unwrap_or(""));

    let account = if account.is_empty() {
        "no_account".to_string()
    } else {
        account
    };
    let issuer = if issuer.is_empty() {
        "no_issuer".to_string()
    } else {
        issuer
    };

    sanitize(&format!("{}_{}_{}", service.name, account, issuer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::OtpParams;

    fn service(name: &str, account: Option<&str>, issuer: Option<&str>) -> ServiceEntry {
        ServiceEntry {
            name: name.to_string(),
            secret: "JBSWY3DPEHPK3PXP".to_string(),
            otp: OtpParams {
                account: account.map(str::to_string),
                issuer: issuer.map(str::to_string),
                algorithm: "SHA1".to_string(),
                digits: 6,
                period: 30,
            },
        }
    }

    #[test]
    fn encodes_space_as_plus_and_escapes_reserved() {
        assert_eq!(encode_component("My Service"), "My+Service");
        assert_eq!(encode_component("bob@example.com"), "bob%40example.com");
        assert_eq!(encode_component("a+b&c=d"), "a%2Bb%26c%3Dd");
        assert_eq!(encode_component("safe-._~"), "safe-._~");
    }

    #[test]
    fn encodes_non_ascii_as_utf8_bytes() {
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn builds_byte_exact_uri() {
        let entry = service("My Service", Some("bob@example.com"), Some("MyIssuer"));
        assert_eq!(
            totp_uri(&entry),
            "otpauth://totp/My+Service:bob%40example.com?secret=JBSWY3DPEHPK3PXP&issuer=MyIssuer&algorithm=SHA1&digits=6&period=30"
        );
    }

    #[test]
    fn absent_fields_become_empty_components() {
        let entry = service("Plain", None, None);
        assert_eq!(
            totp_uri(&entry),
            "otpauth://totp/Plain:?secret=JBSWY3DPEHPK3PXP&issuer=&algorithm=SHA1&digits=6&period=30"
        );
    }

    #[test]
    fn sanitize_drops_all_punctuation() {
        assert_eq!(sanitize("My_Service_01!"), "MyService01");
        assert_eq!(sanitize("AB_C"), sanitize("ABC_"));
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn filename_uses_markers_for_missing_fields() {
        let entry = service("Plain", None, None);
        assert_eq!(qr_filename(&entry), "Plainnoaccountnoissuer");
    }

    #[test]
    fn filename_is_built_from_encoded_components() {
        // The encoded account keeps the hex digits of the escape sequence.
        let entry = service("Mail", Some("bob@example.com"), Some("My Issuer"));
        assert_eq!(qr_filename(&entry), "Mailbob40examplecomMyIssuer");
    }

    #[test]
    fn empty_strings_fall_back_to_markers() {
        let entry = service("Edge", Some(""), Some(""));
        assert_eq!(qr_filename(&entry), "Edgenoaccountnoissuer");
    }
}
