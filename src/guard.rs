//! Tool-use policy.
//!
//! Two classes of tool call are refused before they run: anything touching
//! a `.env` file (secrets), and recursive forced deletions that could take
//! out far more than intended. In the other direction, read-only tools and
//! a short list of inspection commands may be approved without asking.

use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

/// Tools whose `file_path` argument is checked for `.env` access.
const FILE_TOOLS: &[&str] = &["Read", "Edit", "MultiEdit", "Write"];

/// A `.env` reference (`.env`, `.env.local`, but not `.envrc`).
static ENV_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.env\b").expect("Invalid env reference regex"));

/// Recursive and forced, in any flag spelling or order.
static RM_RECURSIVE_FORCE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\brm\s+.*-[a-z]*r[a-z]*f",
        r"\brm\s+.*-[a-z]*f[a-z]*r",
        r"\brm\s+--recursive\s+--force",
        r"\brm\s+--force\s+--recursive",
        r"\brm\s+-r\s+.*-f",
        r"\brm\s+-f\s+.*-r",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid rm pattern"))
    .collect()
});

static RM_RECURSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brm\s+.*-[a-z]*r").expect("Invalid rm regex"));

/// Path fragments that make any recursive `rm` too broad.
const DANGEROUS_PATH_FRAGMENTS: &[&str] = &["/", "~", "$home", "..", "*", "."];

/// Tools that never modify anything.
const READ_ONLY_TOOLS: &[&str] = &["Read", "Glob", "Grep"];

/// Shell commands that only inspect. Matched against the trimmed command.
static SAFE_BASH_COMMANDS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^ls\b",
        r"^pwd\b",
        r"^echo\b",
        r"^cat\b[^>]*$",
        r"^head\b",
        r"^tail\b",
        r"^wc\b",
        r"^which\b",
        r"^whereis\b",
        r"^type\b",
        r"^file\b",
        r"^stat\b",
        r"^git\s+(status|log|diff|show|branch|tag)\b",
        r"^git\s+remote\s+-v\b",
        r"^npm\s+(list|ls|outdated|view)\b",
        r"^pip\s+(list|show|freeze)\b",
        r"^uv\s+(pip\s+list|tree)\b",
        r"^python\s+--version\b",
        r"^node\s+--version\b",
        r"^npm\s+--version\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid safe command pattern"))
    .collect()
});

/// Why a tool call was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    EnvFileAccess,
    DangerousRm,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::EnvFileAccess => write!(
                f,
                "BLOCKED: Access to .env files containing sensitive data is prohibited\n\
                 Use .env.example for template files instead"
            ),
            BlockReason::DangerousRm => {
                write!(f, "BLOCKED: Dangerous rm command detected and prevented")
            }
        }
    }
}

/// Decide whether a tool call may run. `None` means allowed.
pub fn check_tool_use(tool_name: &str, tool_input: &Map<String, Value>) -> Option<BlockReason> {
    let field = |key: &str| tool_input.get(key).and_then(Value::as_str).unwrap_or_default();

    if FILE_TOOLS.contains(&tool_name) && is_env_path(field("file_path")) {
        return Some(BlockReason::EnvFileAccess);
    }

    if tool_name == "Bash" {
        let command = field("command");
        if references_env_file(command) {
            return Some(BlockReason::EnvFileAccess);
        }
        if is_dangerous_rm(command) {
            return Some(BlockReason::DangerousRm);
        }
    }

    None
}

/// Whether a tool call is read-only and may be approved without asking.
pub fn is_auto_allowed(tool_name: &str, tool_input: &Map<String, Value>) -> bool {
    if READ_ONLY_TOOLS.contains(&tool_name) {
        return true;
    }

    tool_name == "Bash"
        && tool_input
            .get("command")
            .and_then(Value::as_str)
            .is_some_and(is_safe_bash_command)
}

/// Whether a shell command is on the inspection-only list.
///
/// Output redirection out of `cat` disqualifies it.
pub fn is_safe_bash_command(command: &str) -> bool {
    let command = command.trim();
    !command.is_empty() && SAFE_BASH_COMMANDS.iter().any(|re| re.is_match(command))
}

/// A path naming an env file other than the `.env.example` template.
pub fn is_env_path(path: &str) -> bool {
    path.contains(".env") && !path.ends_with(".env.example")
}

/// Whether a shell command references a `.env` file.
///
/// `.env.sample` references are allowed; `.envrc` is not an env file.
pub fn references_env_file(command: &str) -> bool {
    ENV_REFERENCE
        .find_iter(command)
        .any(|m| !command[m.end()..].starts_with(".sample"))
}

/// Whether a shell command is a recursive `rm` that is forced or aimed at
/// a broad path.
pub fn is_dangerous_rm(command: &str) -> bool {
    let normalized = command
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if RM_RECURSIVE_FORCE.iter().any(|re| re.is_match(&normalized)) {
        return true;
    }

    RM_RECURSIVE.is_match(&normalized)
        && DANGEROUS_PATH_FRAGMENTS
            .iter()
            .any(|fragment| normalized.contains(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn bash(command: &str) -> Option<BlockReason> {
        check_tool_use("Bash", &input(json!({"command": command})))
    }

    #[test]
    fn test_file_tools_block_env_paths() {
        for tool in ["Read", "Edit", "MultiEdit", "Write"] {
            assert_eq!(
                check_tool_use(tool, &input(json!({"file_path": "/app/.env"}))),
                Some(BlockReason::EnvFileAccess),
                "{}",
                tool
            );
        }
        assert_eq!(
            check_tool_use("Read", &input(json!({"file_path": "/app/.env.local"}))),
            Some(BlockReason::EnvFileAccess)
        );
    }

    #[test]
    fn test_env_example_is_allowed() {
        assert_eq!(
            check_tool_use("Read", &input(json!({"file_path": "/app/.env.example"}))),
            None
        );
    }

    #[test]
    fn test_other_tools_ignore_file_path() {
        assert_eq!(
            check_tool_use("Glob", &input(json!({"file_path": "/app/.env"}))),
            None
        );
        assert_eq!(check_tool_use("Read", &Map::new()), None);
    }

    #[test]
    fn test_bash_env_access_blocked() {
        assert_eq!(bash("cat .env"), Some(BlockReason::EnvFileAccess));
        assert_eq!(bash("cat ./config/.env.local"), Some(BlockReason::EnvFileAccess));
        assert_eq!(bash("echo SECRET=1 > .env"), Some(BlockReason::EnvFileAccess));
        assert_eq!(bash("touch .env"), Some(BlockReason::EnvFileAccess));
        assert_eq!(bash("cp .env backup"), Some(BlockReason::EnvFileAccess));
        assert_eq!(bash("mv prod.env old"), Some(BlockReason::EnvFileAccess));
        assert_eq!(bash("source app.env"), Some(BlockReason::EnvFileAccess));
    }

    #[test]
    fn test_bash_env_sample_allowed() {
        assert_eq!(bash("cat .env.sample"), None);
        assert_eq!(bash("cp .env.sample .env.sample.bak"), None);
    }

    #[test]
    fn test_bash_later_bare_reference_still_blocked() {
        assert_eq!(bash("cat .env.sample .env"), Some(BlockReason::EnvFileAccess));
    }

    #[test]
    fn test_bash_unrelated_env_mentions_allowed() {
        assert_eq!(bash("ls -la"), None);
        assert_eq!(bash("direnv allow .envrc"), None);
        assert_eq!(bash("cargo run --features dotenv"), None);
    }

    #[test]
    fn test_bash_any_env_reference_blocked() {
        assert_eq!(bash("grep KEY .env"), Some(BlockReason::EnvFileAccess));
        assert_eq!(bash("ls\nhead -n1 .env"), Some(BlockReason::EnvFileAccess));
    }

    #[test]
    fn test_rm_recursive_force_variants_blocked() {
        for command in [
            "rm -rf build",
            "rm -fr build",
            "rm -Rf build",
            "rm --recursive --force build",
            "rm --force --recursive build",
            "rm -r build -f",
            "rm -f build -r",
            "sudo   rm   -rf   target",
        ] {
            assert_eq!(bash(command), Some(BlockReason::DangerousRm), "{}", command);
        }
    }

    #[test]
    fn test_recursive_rm_on_broad_paths_blocked() {
        for command in ["rm -r /", "rm -r ~", "rm -r $HOME", "rm -r ..", "rm -r *", "rm -r ."] {
            assert!(is_dangerous_rm(command), "{}", command);
        }
    }

    #[test]
    fn test_safe_rm_allowed() {
        assert_eq!(bash("rm file"), None);
        assert_eq!(bash("rm -f file"), None);
        assert_eq!(bash("rm -r build"), None);
        assert_eq!(bash("echo remove"), None);
    }

    #[test]
    fn test_read_only_tools_are_auto_allowed() {
        for tool in ["Read", "Glob", "Grep"] {
            assert!(is_auto_allowed(tool, &Map::new()), "{}", tool);
        }
        assert!(!is_auto_allowed("Write", &input(json!({"file_path": "a.txt"}))));
        assert!(!is_auto_allowed("Edit", &Map::new()));
    }

    #[test]
    fn test_safe_bash_commands() {
        for command in [
            "ls -la",
            "  pwd",
            "cat README.md",
            "git status",
            "git log --oneline",
            "git remote -v",
            "npm list",
            "uv pip list",
            "python --version",
        ] {
            assert!(is_safe_bash_command(command), "{}", command);
        }
    }

    #[test]
    fn test_unsafe_bash_commands() {
        for command in [
            "",
            "cat a > b",
            "git push",
            "git remote add origin x",
            "npm install",
            "rm -rf build",
            "lsof -i",
        ] {
            assert!(!is_safe_bash_command(command), "{}", command);
        }
        assert!(!is_auto_allowed("Bash", &input(json!({"command": "make"}))));
        assert!(!is_auto_allowed("Bash", &Map::new()));
    }

    #[test]
    fn test_block_messages() {
        assert!(BlockReason::EnvFileAccess.to_string().contains(".env.example"));
        assert_eq!(
            BlockReason::DangerousRm.to_string(),
            "BLOCKED: Dangerous rm command detected and prevented"
        );
    }
}
