//! Test fixtures for common test scenarios.
//!
//! The sample workspace has three components:
//!
//! - `dc1` with sources and tests, publishing `api` and `assembly`;
//! - `dc2` using both of `dc1`'s parts at build time;
//! - `dc3` using `dc1`'s `defLib` at run time only.

use std::path::Path;

use crate::builder::renderer::RenderMode;
use crate::core::component::DevelopmentComponent;
use crate::core::layout::{join_folder, LocationResolver};
use crate::core::reference::PublicPartReference;
use crate::core::workspace::{ComponentSource, Workspace};
use crate::util::config::GenerateConfig;

/// Minimal checkstyle configuration.
pub const CHECKSTYLE_CONFIG: &str = r#"<?xml version="1.0"?>
<!DOCTYPE module PUBLIC "-//Puppy Crawl//DTD Check Configuration 1.3//EN" "https://checkstyle.org/dtds/configuration_1_3.dtd">
<module name="Checker">
  <module name="TreeWalker">
    <module name="UnusedImports"/>
  </module>
</module>
"#;

/// The sample workspace as `components.toml`.
pub const SAMPLE_MANIFEST: &str = r#"
[[component]]
vendor = "vendor.com"
name = "dc1"
source-folders = ["src/packages"]
test-source-folders = ["test/packages"]
output-folder = "classes"
public-parts = ["api", "assembly"]

[[component]]
vendor = "vendor.com"
name = "dc2"
source-folders = ["src/packages"]
output-folder = "classes"
public-parts = ["defLib"]

[[component.uses]]
vendor = "vendor.com"
component = "dc1"
part = "api"
build-time = true

[[component.uses]]
vendor = "vendor.com"
component = "dc1"
part = "assembly"
build-time = true

[[component]]
vendor = "vendor.com"
name = "dc3"
source-folders = ["src/packages"]
output-folder = "classes"

[[component.uses]]
vendor = "vendor.com"
component = "dc1"
part = "defLib"
run-time = true
"#;

/// The sample workspace's components.
pub fn sample_components() -> Vec<DevelopmentComponent> {
    vec![
        DevelopmentComponent::new("vendor.com", "dc1")
            .with_source_folder("src/packages")
            .with_test_source_folder("test/packages")
            .with_output_folder("classes")
            .with_public_part("api")
            .with_public_part("assembly"),
        DevelopmentComponent::new("vendor.com", "dc2")
            .with_source_folder("src/packages")
            .with_output_folder("classes")
            .with_public_part("defLib")
            .with_reference(PublicPartReference::new("vendor.com", "dc1", "api").build_time())
            .with_reference(
                PublicPartReference::new("vendor.com", "dc1", "assembly").build_time(),
            ),
        DevelopmentComponent::new("vendor.com", "dc3")
            .with_source_folder("src/packages")
            .with_output_folder("classes")
            .with_reference(PublicPartReference::new("vendor.com", "dc1", "defLib").run_time()),
    ]
}

/// Generation inputs with a valid checkstyle configuration and no excludes.
pub fn generate_config() -> GenerateConfig {
    GenerateConfig {
        checkstyle_config: CHECKSTYLE_CONFIG.to_string(),
        excludes: Vec::new(),
        exclude_contains_regexps: Vec::new(),
        mode: RenderMode::PerComponent,
    }
}

/// Write a class and a test into every source folder of every component.
pub fn write_sources(ws: &Workspace) {
    for component in ws.components() {
        let base = ws.base_location(component.id());
        let folders = component
            .source_folders()
            .iter()
            .chain(component.test_source_folders());
        for folder in folders {
            let dir = join_folder(&base, folder).join("com").join("example");
            write_java(&dir, "Service", "");
            write_java(&dir, "ServiceTest", "import org.junit.Test;\n");
        }
    }
}

/// Write `<dir>/<class>.java`.
pub fn write_java(dir: &Path, class: &str, header: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join(format!("{}.java", class)),
        format!(
            "package com.example;\n{}\npublic class {} {{\n}}\n",
            header, class
        ),
    )
    .unwrap();
}
