use std::path::{Path, PathBuf};

use rtisff::{
    AcquisitionConfig, CameraConfig, FocusSettings, LightSource, METADATA_HEADER, OutputLayout,
};

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_rtisff")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) { "rtisff.exe" } else { "rtisff" });
            p
        })
}

fn write_config(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::copy("tests/data/rig_small.lp", dir.join("rig.lp")).unwrap();

    let cfg = AcquisitionConfig {
        lights: LightSource::LpFile {
            path: PathBuf::from("rig.lp"),
        },
        focus: FocusSettings::Manual {
            min_z: 0.0,
            max_z: 0.4,
            count: 3,
        },
        camera: CameraConfig::fixed(2.0, 2.8),
        output: OutputLayout::new("renders", "coin"),
    };

    let cfg_path = dir.join("acquisition.json");
    let f = std::fs::File::create(&cfg_path).unwrap();
    serde_json::to_writer_pretty(f, &cfg).unwrap();
    cfg_path
}

#[test]
fn cli_plan_writes_csv_and_plan() {
    let dir = PathBuf::from("target").join("cli_smoke");
    let cfg_path = write_config(&dir);
    let csv_path = dir.join("renders").join("coin.csv");
    let plan_path = dir.join("plan.json");
    let _ = std::fs::remove_file(&csv_path);
    let _ = std::fs::remove_file(&plan_path);

    let cfg_arg = cfg_path.to_string_lossy().to_string();
    let plan_arg = plan_path.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args(["plan", "--config", cfg_arg.as_str(), "--plan-json"])
        .arg(plan_arg.as_str())
        .status()
        .unwrap();
    assert!(status.success());

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], METADATA_HEADER);
    assert_eq!(lines[1], "coin-01,0.1,0.2,0.9,2.0,2.8,50.0");
    assert!(lines[12].starts_with("coin-12,-0.6,-0.2,0.77,"));
    assert!(csv.ends_with('\n'));

    let plan: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&plan_path).unwrap()).unwrap();
    assert_eq!(plan["timeline"]["frames"].as_array().unwrap().len(), 12);
    assert!(
        plan["render"]["filepath_template"]
            .as_str()
            .unwrap()
            .ends_with("/PNG/coin-##")
    );
    assert_eq!(plan["markers"].as_array().unwrap().len(), 3);
}

#[test]
fn cli_plan_dry_run_writes_nothing() {
    let dir = PathBuf::from("target").join("cli_smoke_dry");
    let cfg_path = write_config(&dir);
    let csv_path = dir.join("renders").join("coin.csv");
    let _ = std::fs::remove_file(&csv_path);

    let status = std::process::Command::new(exe())
        .args(["plan", "--dry-run", "--config"])
        .arg(cfg_path.as_os_str())
        .status()
        .unwrap();
    assert!(status.success());
    assert!(!csv_path.exists());
}

#[test]
fn cli_lights_rejects_missing_file() {
    let status = std::process::Command::new(exe())
        .args(["lights", "--lp", "tests/data/missing.lp"])
        .status()
        .unwrap();
    assert!(!status.success());
}
