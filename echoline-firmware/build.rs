//! Build script for echoline-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates sonar.toml at compile time and turns it into a `const`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use echoline_core::config::SonarConfig;
use serde::Deserialize;

/// Top level of sonar.toml
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SonarFile {
    #[serde(default)]
    sonar: SonarConfig,
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    let config = load_config();
    emit_config(&out_dir, &config);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate sonar.toml
fn load_config() -> SonarConfig {
    println!("cargo:rerun-if-changed=sonar.toml");

    let config_path = Path::new("sonar.toml");

    // A missing file means stock HC-SR04 timing
    if !config_path.exists() {
        println!("cargo:warning=sonar.toml not found, using default timing");
        return SonarConfig::default();
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read sonar.toml", &[e.to_string()]),
    };

    let file: SonarFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => fail(
            "Invalid sonar.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    if let Err(e) = file.sonar.validate() {
        let detail = match e {
            echoline_core::ConfigError::TriggerPulseOutOfRange => {
                format!("trigger_pulse_us must be 1-100, got {}", file.sonar.trigger_pulse_us)
            }
            echoline_core::ConfigError::ZeroCadencePeriod => {
                "cadence_period_ms must be greater than 0".to_string()
            }
            echoline_core::ConfigError::ZeroDisplayTimeout => {
                "display_timeout_ms must be greater than 0".to_string()
            }
            echoline_core::ConfigError::TimeoutExceedsPeriod => format!(
                "display_timeout_ms ({}) exceeds cadence_period_ms ({})",
                file.sonar.display_timeout_ms, file.sonar.cadence_period_ms
            ),
        };
        fail("Invalid [sonar] configuration", &[detail]);
    }

    file.sonar
}

/// Write the validated config as a Rust constant
fn emit_config(out_dir: &Path, config: &SonarConfig) {
    let source = format!(
        "/// Measurement cycle timing from sonar.toml\n\
         pub const SONAR_CONFIG: SonarConfig = SonarConfig {{\n    \
             trigger_pulse_us: {},\n    \
             cadence_period_ms: {},\n    \
             display_timeout_ms: {},\n    \
             stale_policy: StalePolicy::{:?},\n\
         }};\n",
        config.trigger_pulse_us,
        config.cadence_period_ms,
        config.display_timeout_ms,
        config.stale_policy,
    );
    fs::write(out_dir.join("sonar_config.rs"), source).unwrap();
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|l| format!("║  • {:<62} ║", l))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
