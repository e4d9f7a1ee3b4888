use crate::editor::ProfileSnapshot;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;
use std::sync::OnceLock;
use std::thread;
use std::{collections::HashMap, env, fs};
use tracing::{info, warn};

/// Receives the committed profile when the form is saved.
pub trait ProfileSink: Send + Sync {
    fn describe(&self) -> String;
    fn save(&self, snapshot: &ProfileSnapshot) -> Result<()>;
}

pub struct YamlFileSink {
    pub path: PathBuf,
}

impl YamlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProfileSink for YamlFileSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn save(&self, snapshot: &ProfileSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {parent:?}"))?;
            }
        }
        let text = serde_yaml::to_string(snapshot).context("encoding profile")?;
        fs::write(&self.path, text).with_context(|| format!("writing {:?}", self.path))?;
        Ok(())
    }
}

pub struct CommandSink {
    pub cmdline: String,
}

impl CommandSink {
    pub fn new(cmdline: impl Into<String>) -> Self {
        Self {
            cmdline: cmdline.into(),
        }
    }
}

static ENV_REF: OnceLock<Regex> = OnceLock::new();

pub(crate) fn expand_cmdline_env(cmdline: &str) -> String {
    // Expand ${VAR} from environment; unknown variables expand to ""
    let re = ENV_REF.get_or_init(|| Regex::new(r"\$\{([A-Za-z0-9_]+)\}").unwrap());
    let env_map: HashMap<String, String> = env::vars().collect();
    re.replace_all(cmdline, |caps: &regex::Captures| {
        let v = env_map.get(&caps[1]).cloned().unwrap_or_default();
        // Quote if contains whitespace to keep it a single arg in shlex::split
        if v.chars().any(|c| c.is_whitespace()) {
            let escaped = v.replace('"', "\\\"");
            return format!("\"{escaped}\"");
        }
        v
    })
    .to_string()
}

impl ProfileSink for CommandSink {
    fn describe(&self) -> String {
        self.cmdline.clone()
    }

    fn save(&self, snapshot: &ProfileSnapshot) -> Result<()> {
        let expanded = expand_cmdline_env(&self.cmdline);
        let parts =
            shlex::split(&expanded).ok_or_else(|| anyhow!("Failed to parse command line"))?;
        if parts.is_empty() {
            return Err(anyhow!("Empty command line"));
        }
        let payload = serde_json::to_vec(snapshot).context("encoding profile JSON")?;
        let mut child = Command::new(&parts[0])
            .args(&parts[1..])
            .env("PROFILE_TUI_JSON", "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawning {expanded}"))?;
        let stdin = child.stdin.take();
        // stdin is fed while wait_with_output drains stderr, so neither pipe
        // can stall the other
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(|| -> std::io::Result<()> {
                let Some(mut stdin) = stdin else {
                    return Ok(());
                };
                // A command that exits without reading is judged by its status
                match stdin.write_all(&payload) {
                    Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e),
                    _ => Ok(()),
                }
            });
            let output = child.wait_with_output();
            (writer.join(), output)
        });
        let output = output.with_context(|| format!("waiting for {expanded}"))?;
        written
            .map_err(|_| anyhow!("stdin writer for {expanded} panicked"))?
            .with_context(|| format!("writing profile to {expanded}"))?;
        if !output.status.success() {
            let err = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(anyhow!("Command failed: {}\n{}", self.cmdline, err));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct SaveMsg {
    pub outcome: Result<String, String>,
}

/// Runs every sink in order on a worker thread and reports once.
pub fn spawn_save(
    sinks: Vec<std::sync::Arc<dyn ProfileSink>>,
    snapshot: ProfileSnapshot,
    tx: Sender<SaveMsg>,
) {
    thread::spawn(move || {
        let outcome = run_sinks(&sinks, &snapshot);
        let _ = tx.send(SaveMsg { outcome });
    });
}

pub fn run_sinks(
    sinks: &[std::sync::Arc<dyn ProfileSink>],
    snapshot: &ProfileSnapshot,
) -> Result<String, String> {
    if sinks.is_empty() {
        return Ok("Saved (no sink configured)".to_string());
    }
    let mut targets: Vec<String> = Vec::new();
    for sink in sinks {
        let target = sink.describe();
        if let Err(e) = sink.save(snapshot) {
            warn!(sink = %target, error = %format!("{e:#}"), "profile save failed");
            return Err(format!("{e:#}"));
        }
        info!(sink = %target, fields = snapshot.entries.len(), "profile saved");
        targets.push(target);
    }
    Ok(format!("Saved to {}", targets.join(", ")))
}
