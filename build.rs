use std::{env, fs, path::PathBuf};

fn main() {
    // 1) Hand the linker a memory map when building for the Pico.
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    if target.starts_with("thumbv6m") {
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        let dest = out_dir.join("memory.x");
        fs::write(&dest, memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory.x");
    }

    // 2) Load optional env files for convenience.
    let _ = dotenvy::from_filename(".env");
    load_home_env(".pico.env");
    load_home_env(".env");

    // 3) The Pico has no battery-backed clock, so the firmware seeds its clock
    //    from compile-time constants: the UTC offset and the build timestamp.
    let utc_offset = env_or_default("UTC_OFFSET_MINUTES", "0");
    let build_unix = env::var("BUILD_UNIX_SECONDS").unwrap_or_else(|_| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs().to_string())
            .unwrap_or_else(|_| "0".to_string())
    });

    // 4) Expose as compile-time constants
    println!("cargo:rustc-env=UTC_OFFSET_MINUTES={utc_offset}");
    println!("cargo:rustc-env=BUILD_UNIX_SECONDS={build_unix}");

    println!("cargo:rerun-if-env-changed=UTC_OFFSET_MINUTES");
    println!("cargo:rerun-if-env-changed=BUILD_UNIX_SECONDS");
    println!("cargo:rerun-if-changed=.env");
}

fn load_home_env(file: &str) {
    let home = match env::var_os("USERPROFILE").or_else(|| env::var_os("HOME")) {
        Some(path) => PathBuf::from(path),
        None => return,
    };
    let path = home.join(file);
    let _ = dotenvy::from_path(&path);
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
