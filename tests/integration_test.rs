use assert_cmd::Command;
use assert_cmd::cargo;
use flate2::Compression;
use flate2::write::GzEncoder;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::prelude::*;
use std::path::Path;
use tar::Builder;
use tempfile::tempdir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

const CONSOLE_TEMPLATE: &str = r#"{
    // comments are allowed in template manifests
    "identity": "Foo.Console",
    "name": "Foo Console",
    "shortName": "fooconsole",
    "tags": { "language": "C#", "type": "project" },
}"#;

fn create_nupkg(path: &Path, files: &[(&str, &[u8])]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options: FileOptions<()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap();
}

fn create_tar_gz(path: &Path, files: &[(&str, &str)]) {
    let mut tar_builder = Builder::new(Vec::new());
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_path(name).unwrap();
        header.set_cksum();
        tar_builder.append(&header, content.as_bytes()).unwrap();
    }
    let tar = tar_builder.into_inner().unwrap();

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tar).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

#[test]
fn test_inspect_nupkg() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("Foo.Templates.1.2.3.nupkg");
    create_nupkg(
        &archive,
        &[
            (
                "content/console/.template.config/template.json",
                CONSOLE_TEMPLATE.as_bytes(),
            ),
            ("content/console/Program.cs", b"Console.WriteLine();"),
        ],
    );

    Command::new(cargo::cargo_bin!("tplpkg"))
        .arg("inspect")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Foo Console [fooconsole] C# (Foo.Templates 1.2.3)",
        ));
}

#[test]
fn test_inspect_tar_gz() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("Bar.Templates.2.0.0-beta.1.tar.gz");
    create_tar_gz(
        &archive,
        &[("web/.template.config/template.json", r#"{ "name": "Bar Web" }"#)],
    );

    Command::new(cargo::cargo_bin!("tplpkg"))
        .arg("inspect")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Bar Web (Bar.Templates 2.0.0-beta.1)",
        ));
}

#[test]
fn test_inspect_archive_without_templates() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("Plain.1.0.0.nupkg");
    create_nupkg(&archive, &[("lib/net8.0/Plain.dll", b"\0")]);

    Command::new(cargo::cargo_bin!("tplpkg"))
        .arg("inspect")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("No templates found."));
}

#[test]
fn test_inspect_malformed_manifest_fails() {
    let dir = tempdir().unwrap();
    let archive = dir.path().join("Broken.1.0.0.nupkg");
    create_nupkg(
        &archive,
        &[("content/x/.template.config/template.json", b"{ not json")],
    );

    Command::new(cargo::cargo_bin!("tplpkg"))
        .arg("inspect")
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("template.json"));
}

#[test]
fn test_templates_lists_local_packages() {
    let dir = tempdir().unwrap();
    let dotnet_root = dir.path().join("dotnet");
    let sdk_dir = dotnet_root.join("templates").join("8.0.100");
    let packages_dir = dir.path().join("packages");
    fs::create_dir_all(&sdk_dir).unwrap();
    fs::create_dir_all(&packages_dir).unwrap();

    create_nupkg(
        &sdk_dir.join("Builtin.Templates.8.0.1.nupkg"),
        &[(
            "content/classlib/.template.config/template.json",
            br#"{ "name": "Class Library" }"#,
        )],
    );
    create_nupkg(
        &packages_dir.join("Foo.Templates.1.2.3.nupkg"),
        &[(
            "content/console/.template.config/template.json",
            CONSOLE_TEMPLATE.as_bytes(),
        )],
    );

    Command::new(cargo::cargo_bin!("tplpkg"))
        .arg("templates")
        .arg("--dotnet-root")
        .arg(&dotnet_root)
        .arg("--packages-dir")
        .arg(&packages_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Class Library (Builtin.Templates 8.0.1, built-in)",
        ))
        .stdout(predicate::str::contains("Foo Console [fooconsole] C# (Foo.Templates 1.2.3)"));
}

#[test]
fn test_list_reconciles_catalog() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/query")
        .match_query(Matcher::UrlEncoded(
            "packageType".into(),
            "Template".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "totalHits": 3,
                "data": [
                    { "id": "Foo.Templates", "version": "1.2.0" },
                    { "id": "Builtin.Templates", "version": "8.0.1" },
                    { "id": "Bar.Templates", "version": "2.0.0" }
                ]
            }"#,
        )
        .create();

    let dir = tempdir().unwrap();
    let dotnet_root = dir.path().join("dotnet");
    let sdk_dir = dotnet_root.join("templates").join("8.0.100");
    let packages_dir = dir.path().join("packages");
    fs::create_dir_all(&sdk_dir).unwrap();
    fs::create_dir_all(&packages_dir).unwrap();

    create_nupkg(&sdk_dir.join("Builtin.Templates.8.0.1.nupkg"), &[]);
    create_nupkg(&packages_dir.join("Foo.Templates.1.0.0.nupkg"), &[]);
    create_nupkg(&packages_dir.join("foo.templates.1.1.0.nupkg"), &[]);

    Command::new(cargo::cargo_bin!("tplpkg"))
        .arg("list")
        .arg("--catalog-url")
        .arg(format!("{}/query", server.url()))
        .arg("--dotnet-root")
        .arg(&dotnet_root)
        .arg("--packages-dir")
        .arg(&packages_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Foo.Templates 1.2.0 [installed 1.1.0]",
        ))
        .stdout(predicate::str::contains(
            "Builtin.Templates 8.0.1 [built-in 8.0.1]",
        ))
        .stdout(predicate::str::contains("Bar.Templates 2.0.0\n"));
}

#[test]
fn test_list_catalog_not_found_fails() {
    let mut server = Server::new();

    let _mock = server
        .mock("GET", "/query")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();

    let dir = tempdir().unwrap();

    Command::new(cargo::cargo_bin!("tplpkg"))
        .arg("list")
        .arg("--catalog-url")
        .arg(format!("{}/query", server.url()))
        .arg("--dotnet-root")
        .arg(dir.path().join("dotnet"))
        .arg("--packages-dir")
        .arg(dir.path().join("packages"))
        .assert()
        .failure();
}

#[test]
fn test_unknown_command_fails() {
    Command::new(cargo::cargo_bin!("tplpkg"))
        .arg("frobnicate")
        .assert()
        .failure();
}
