//! Tests for HierarchyService using file fixtures

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use hierarchy::application::services::{HierarchyService, HierarchySummary};
use hierarchy::application::ApplicationError;
use hierarchy::domain::DomainError;
use hierarchy::infrastructure::traits::RealFileSystem;

const RESOURCES: &str = "tests/resources/hierarchies";

fn service() -> HierarchyService {
    HierarchyService::new(Arc::new(RealFileSystem))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(RESOURCES).join(name)
}

fn names<'a>(iter: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    iter.map(String::as_str).collect()
}

// ============================================================
// Valid Hierarchies
// ============================================================

#[test]
fn given_org_chart_when_loading_then_builds_hierarchy() {
    let hierarchy = service().load(&fixture("org.toml")).unwrap();

    assert_eq!(names(hierarchy.first_level()), vec!["ceo", "board"]);
    assert_eq!(
        names(hierarchy.children(Some(&"cto".to_string())).unwrap()),
        vec!["platform", "product"]
    );
    assert_eq!(
        hierarchy.parent(&"sre".to_string()).unwrap(),
        Some(&"platform".to_string())
    );
    assert_eq!(hierarchy.parent(&"board".to_string()).unwrap(), None);
}

#[test]
fn given_org_chart_when_summarizing_then_counts_match() {
    let service = service();
    let hierarchy = service.load(&fixture("org.toml")).unwrap();

    assert_eq!(
        service.summarize(&hierarchy),
        HierarchySummary {
            elements: 8,
            first_level: 2,
            depth: 4,
            leaves: 4,
        }
    );
}

#[test]
fn given_file_without_nodes_when_loading_then_hierarchy_is_empty() {
    let hierarchy = service().load(&fixture("empty.toml")).unwrap();
    assert!(hierarchy.is_empty());
}

#[test]
fn given_temp_file_when_loading_then_reads_from_disk() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.toml");
    std::fs::write(
        &path,
        "[[node]]\nname = \"root\"\n\n[[node]]\nname = \"leaf\"\nparent = \"root\"\n",
    )
    .unwrap();

    // Act
    let hierarchy = service().load(&path).unwrap();

    // Assert
    assert_eq!(hierarchy.len(), 2);
    assert_eq!(hierarchy.leaves(), vec![&"leaf".to_string()]);
}

// ============================================================
// Invalid Hierarchies
// ============================================================

#[test]
fn given_child_before_parent_when_loading_then_unknown_parent() {
    let err = service().load(&fixture("child_first.toml")).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnknownParent(ref parent)) if parent == "root"
    ));
}

#[test]
fn given_duplicate_name_when_loading_then_duplicate_element() {
    let err = service().load(&fixture("duplicate.toml")).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::DuplicateElement(ref name)) if name == "child"
    ));
}

#[rstest]
#[case::unclosed_table("[[node]\nname = \"root\"\n")]
#[case::missing_name("[[node]]\nparent = \"root\"\n")]
#[case::typo_in_key("[[node]]\nname = \"a\"\nparnet = \"b\"\n")]
#[case::wrong_type("[[node]]\nname = 42\n")]
fn given_malformed_content_when_parsing_then_parse_error(#[case] content: &str) {
    let err = service().parse(content, Path::new("inline.toml")).unwrap_err();

    assert!(matches!(err, ApplicationError::Parse { .. }));
    assert!(err.to_string().contains("inline.toml"));
}

#[test]
fn given_malformed_file_when_loading_then_parse_error() {
    let err = service().load(&fixture("malformed.toml")).unwrap_err();

    assert!(matches!(err, ApplicationError::Parse { .. }));
    assert!(err.to_string().contains("malformed.toml"));
}

#[test]
fn given_missing_file_when_loading_then_operation_failed() {
    let err = service().load(&fixture("does-not-exist.toml")).unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("does-not-exist.toml"));
}

#[test]
fn given_directory_when_loading_then_parse_error() {
    let temp = TempDir::new().unwrap();

    let err = service().load(temp.path()).unwrap_err();

    assert!(matches!(err, ApplicationError::Parse { .. }));
}
