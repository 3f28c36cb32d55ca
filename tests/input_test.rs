use std::fs;
use std::path::PathBuf;

use gt::error::Error;
use gt::input::{read_file, DataSource};
use gt::renderer::{GoTemplateRenderer, TemplateRenderer};
use tempfile::TempDir;

#[test]
fn test_detect_source() {
    let path = PathBuf::from("data.json");
    assert_eq!(DataSource::detect(Some(path.clone()), true), DataSource::File(path.clone()));
    assert_eq!(DataSource::detect(Some(path.clone()), false), DataSource::File(path));
    assert_eq!(DataSource::detect(None, false), DataSource::Stdin);
    assert_eq!(DataSource::detect(None, true), DataSource::Terminal);
}

#[test]
fn test_terminal_has_no_data() {
    assert_eq!(DataSource::Terminal.load().unwrap(), None);
}

#[test_log::test]
fn test_render_from_files() {
    let temp_dir = TempDir::new().unwrap();
    let template_path = temp_dir.path().join("greeting.tmpl");
    let data_path = temp_dir.path().join("data.json");
    fs::write(&template_path, "{{range .}}Hello, {{.name}}!\n{{end}}").unwrap();
    fs::write(&data_path, r#"[{"name": "John"}, {"name": "Jane"}]"#).unwrap();

    let template = read_file(&template_path).unwrap();
    let data = DataSource::File(data_path).load().unwrap();
    let output = GoTemplateRenderer::default().render(&template, data.as_deref()).unwrap();

    assert_eq!(output, "Hello, John!\nHello, Jane!\n");
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");

    assert!(matches!(read_file(&missing), Err(Error::IoError(_))));
    assert!(matches!(DataSource::File(missing).load(), Err(Error::IoError(_))));
}
