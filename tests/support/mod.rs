#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn helper_binary(name: &str) -> PathBuf {
    match name {
        "avm-list" => PathBuf::from(env!("CARGO_BIN_EXE_avm-list")),
        "avm-path" => PathBuf::from(env!("CARGO_BIN_EXE_avm-path")),
        other => panic!("unknown helper binary {other}"),
    }
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// A throwaway install tree plus a registry describing it.
///
/// Versions are registered with paths under the temp dir; only the files
/// passed to `install_file` exist on disk.
pub struct Installation {
    temp: TempDir,
    applications: Vec<(String, Vec<String>)>,
}

impl Installation {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("failed to allocate install root")?,
            applications: Vec::new(),
        })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Register a version whose `ExeFilePath` is `<root>/<dir>/<exe>` and
    /// whose `InstallDir` is `<root>/<dir>`.
    pub fn register(&mut self, app: &str, version: &str, dir: &str, exe: &str, is_default: bool) {
        let install_dir = self.root().join(dir);
        let exe_path = install_dir.join(exe);
        let element = format!(
            r#"<Version Name="{app}" VersionNumber="{version}" ExeFilePath="{}" InstallDir="{}" Platform="x64" ProductType="Full" Category="Sesam" IsDefault="{}" />"#,
            exe_path.display(),
            install_dir.display(),
            if is_default { "True" } else { "False" }
        );
        match self.applications.iter_mut().find(|(name, _)| name == app) {
            Some((_, versions)) => versions.push(element),
            None => self.applications.push((app.to_string(), vec![element])),
        }
    }

    /// Create an (empty) file at `<root>/<relative>`.
    pub fn install_file(&self, relative: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, b"")?;
        Ok(path)
    }

    /// Write the registry under `<root>/<vendor>/ApplicationVersionManager/`.
    pub fn write_registry(&self, vendor: &str) -> Result<PathBuf> {
        let dir = self.root().join(vendor).join("ApplicationVersionManager");
        fs::create_dir_all(&dir)?;
        let path = dir.join("ApplicationVersions.xml");
        let mut body = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<ApplicationVersionManager>\n  <Applications>\n");
        for (name, versions) in &self.applications {
            body.push_str(&format!("    <Application Name=\"{name}\">\n      <Versions>\n"));
            for version in versions {
                body.push_str(&format!("        {version}\n"));
            }
            body.push_str("      </Versions>\n    </Application>\n");
        }
        body.push_str("  </Applications>\n</ApplicationVersionManager>\n");
        fs::write(&path, body)?;
        Ok(path)
    }
}

/// Collects formatted log output written through a scoped subscriber.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|err| err.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Run `f` with a debug-level subscriber writing into this capture.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.0.lock().unwrap_or_else(|err| err.into_inner());
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
