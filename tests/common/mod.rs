use std::io::Write;
use tempfile::NamedTempFile;

/// Writes a desk configuration with the observed production rate pair
/// and returns the live temp file (deleted on drop).
pub fn write_config() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "media_host_namespace": "demo-cloud",
            "media_host_preset": "unsigned-demo",
            "notifier_service_id": "service_demo",
            "notifier_template_id": "template_demo",
            "notifier_key": "public-key",
            "recipient_label": "DESK OPERATOR",
            "base_unit": "INR",
            "quote_unit": "FRW",
            "rate_base_to_quote": 15.1,
            "rate_quote_to_base": 0.051
        }}"#
    )
    .unwrap();
    file.flush().unwrap();
    file
}
