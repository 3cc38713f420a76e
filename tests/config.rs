use std::time::Duration;

use assert_matches::assert_matches;

use david_annot::config::{ConfigLoader, DEFAULT_BASE_URL, normalize_annotations};
use david_annot::domain::default_annotation_categories;
use david_annot::error::DavidError;

#[test]
fn load_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("david-annot.json");
    std::fs::write(
        &path,
        r#"{
            "base_url": "https://david.example.org",
            "species": "10090:Mus musculus",
            "id_type": "entrez_gene_id",
            "annotations": ["KEGG_PATHWAY", " ", "BIOCARTA"],
            "timeout_secs": 5
        }"#,
    )
    .unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.base_url, "https://david.example.org/");
    assert_eq!(resolved.species.as_str(), "10090:Mus musculus");
    assert_eq!(resolved.id_type.as_str(), "ENTREZ_GENE_ID");
    assert_eq!(resolved.annotations, vec!["KEGG_PATHWAY", "BIOCARTA"]);
    assert_eq!(resolved.timeout, Duration::from_secs(5));
    assert!(resolved.user_agent.starts_with("david-annot/"));
}

#[test]
fn annotation_override_is_normalized() {
    let annotations = normalize_annotations(vec![
        String::new(),
        " KEGG_PATHWAY ".to_string(),
        "\t".to_string(),
    ]);
    assert_eq!(annotations, vec!["KEGG_PATHWAY"]);
}

#[test]
fn empty_object_uses_defaults() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("empty.json");
    std::fs::write(&path, "{}").unwrap();

    let resolved = ConfigLoader::resolve(path.to_str()).unwrap();
    assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    assert_eq!(resolved.annotations, default_annotation_categories());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("missing.json");
    assert_matches!(
        ConfigLoader::resolve(path.to_str()),
        Err(DavidError::ConfigRead(_))
    );
}

#[test]
fn invalid_json_is_reported() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{ \"species\": ").unwrap();
    assert_matches!(
        ConfigLoader::resolve(path.to_str()),
        Err(DavidError::ConfigParse(_))
    );
}
