//! Contents of the generated project files.

use anyhow::Result;

use crate::model::ArchiveRequest;
use crate::naming::escape_file_name;

/// One file of the generated project, path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFile {
    pub path: String,
    pub contents: Vec<u8>,
}

impl ProjectFile {
    fn text(path: impl Into<String>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents: contents.into_bytes(),
        }
    }
}

/// Renders every project file for the cluster named `name`.
pub fn project_files(name: &str, request: &ArchiveRequest) -> Result<Vec<ProjectFile>> {
    let escaped = escape_file_name(name);
    let config_file = format!("{}-cluster.json", escaped);
    let cluster_json = serde_json::to_string_pretty(request.cluster.as_value())?;

    Ok(vec![
        ProjectFile::text("README.txt", readme(name, request)),
        ProjectFile::text("pom.xml", pom(&escaped, &request.target_version)),
        ProjectFile::text(
            format!("src/main/resources/{}", config_file),
            cluster_json + "\n",
        ),
        ProjectFile::text(
            "src/main/resources/project.properties",
            properties(name, request),
        ),
        ProjectFile::text("Dockerfile", dockerfile(&config_file, &request.target_version)),
    ])
}

fn readme(name: &str, request: &ArchiveRequest) -> String {
    let mut out = format!(
        "Project files for cluster \"{}\".\n\nTarget version: {}\n",
        name, request.target_version
    );
    if request.demo_mode {
        out.push_str("\nGenerated in demo mode: the configuration is sample data.\n");
    }
    out.push_str(
        "\nBuild with `mvn package`, or build the container image with `docker build .`.\n",
    );
    out
}

fn pom(artifact: &str, version: &str) -> String {
    let artifact = xml_escape(&artifact.to_lowercase());
    let version = xml_escape(version);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
    <modelVersion>4.0.0</modelVersion>

    <groupId>org.apache.ignite</groupId>
    <artifactId>{artifact}-project</artifactId>
    <version>1.0.0-SNAPSHOT</version>

    <dependencies>
        <dependency>
            <groupId>org.apache.ignite</groupId>
            <artifactId>ignite-core</artifactId>
            <version>{version}</version>
        </dependency>
        <dependency>
            <groupId>org.apache.ignite</groupId>
            <artifactId>ignite-spring</artifactId>
            <version>{version}</version>
        </dependency>
    </dependencies>
</project>
"#
    )
}

fn properties(name: &str, request: &ArchiveRequest) -> String {
    format!(
        "cluster.name={}\ntarget.version={}\ndemo.mode={}\n",
        properties_escape(name),
        properties_escape(&request.target_version),
        request.demo_mode
    )
}

fn dockerfile(config_file: &str, version: &str) -> String {
    format!(
        "FROM apacheignite/ignite:{version}\n\nCOPY src/main/resources/{config_file} /opt/ignite/config/{config_file}\n"
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn properties_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
