use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FxError::render("x").to_string().contains("render error:"));
    assert!(FxError::scene("x").to_string().contains("scene error:"));
    assert!(
        FxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: FxError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, FxError::Serde(_)));
}
