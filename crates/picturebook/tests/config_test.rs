//! Tests for layered configuration.

use picturebook::{PicturebookConfig, VerdictPolicy};
use std::path::Path;

#[test]
fn test_bundled_defaults() -> anyhow::Result<()> {
    let config = PicturebookConfig::from_toml_str("")?;

    assert_eq!(config.workflow.refinement_iterations, 2);
    assert_eq!(config.workflow.verdict_policy, VerdictPolicy::Exact);
    assert_eq!(config.workflow.writer_model, "gemini-2.5-flash-lite");
    assert_eq!(config.workflow.critic_model, None);
    assert_eq!(config.media.voice, "Kore");
    assert_eq!(config.media.image_model, "gemini-2.5-flash-image");
    assert_eq!(config.storage.output_dir, Path::new("outputs"));
    assert!(!config.database.enabled);
    assert_eq!(config.database.url, None);
    Ok(())
}

#[test]
fn test_overrides_replace_only_named_keys() -> anyhow::Result<()> {
    let config = PicturebookConfig::from_toml_str(
        r#"
        [workflow]
        refinement_iterations = 5
        verdict_policy = "lenient"
        temperature = 0.7

        [storage]
        output_dir = "/tmp/books"
        "#,
    )?;

    assert_eq!(config.workflow.refinement_iterations, 5);
    assert_eq!(config.workflow.verdict_policy, VerdictPolicy::Lenient);
    assert_eq!(config.workflow.temperature, Some(0.7));
    assert_eq!(config.workflow.writer_model, "gemini-2.5-flash-lite");
    assert_eq!(config.storage.output_dir, Path::new("/tmp/books"));
    assert_eq!(config.media.speech_model, "gemini-2.5-flash-preview-tts");
    Ok(())
}

#[test]
fn test_workflow_config_carries_settings() -> anyhow::Result<()> {
    let config = PicturebookConfig::from_toml_str(
        r#"
        [workflow]
        refinement_iterations = 0
        verdict_policy = "lenient"
        max_tokens = 2048
        "#,
    )?;

    let workflow = config.workflow_config();
    assert_eq!(*workflow.refinement_iterations(), 0);
    assert_eq!(*workflow.verdict_policy(), VerdictPolicy::Lenient);
    assert_eq!(*workflow.max_tokens(), Some(2048));
    assert_eq!(*workflow.temperature(), None);
    Ok(())
}

#[test]
fn test_role_models_fall_back_to_writer() -> anyhow::Result<()> {
    let config = PicturebookConfig::from_toml_str(
        r#"
        [workflow]
        writer_model = "writer"
        editor_model = "editor"
        "#,
    )?;

    assert_eq!(config.critic_model(), "writer");
    assert_eq!(config.editor_model(), "editor");
    Ok(())
}

#[test]
fn test_explicit_database_url_wins() -> anyhow::Result<()> {
    let config = PicturebookConfig::from_toml_str(
        r#"
        [database]
        enabled = true
        url = "postgres://localhost/books"
        "#,
    )?;

    assert!(config.database.enabled);
    assert_eq!(
        config.database_url().as_deref(),
        Some("postgres://localhost/books")
    );
    Ok(())
}

#[test]
fn test_unknown_verdict_policy_is_rejected() {
    let result = PicturebookConfig::from_toml_str("[workflow]\nverdict_policy = \"sometimes\"\n");
    assert!(result.is_err());
}

#[test]
fn test_load_with_explicit_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[media]\nvoice = \"Puck\"\n")?;

    let config = PicturebookConfig::load(Some(&path))?;
    assert_eq!(config.media.voice, "Puck");
    Ok(())
}

#[test]
fn test_load_with_missing_explicit_file_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let result = PicturebookConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(result.is_err());
    Ok(())
}
