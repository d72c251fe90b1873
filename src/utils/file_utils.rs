use std::fs;
use std::path::PathBuf;

use log::error;

pub fn get_exe_path() -> PathBuf {
    let default_path = PathBuf::from("./");
    match std::env::current_exe() {
        Ok(exe) => match fs::read_link(&exe) {
            Ok(f) => f.parent().map_or(default_path, |p| p.to_path_buf()),
            Err(_) => exe.parent().map_or(default_path, |p| p.to_path_buf()),
        },
        Err(_) => default_path,
    }
}

pub fn get_default_config_path() -> String {
    let config_path = get_exe_path().join("config.yml");
    String::from(if config_path.exists() {
        config_path.to_str().unwrap_or("./config.yml")
    } else {
        "./config.yml"
    })
}

pub fn get_working_path(wd: &str) -> String {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if wd.is_empty() {
        String::from(current_dir.to_str().unwrap_or("."))
    } else {
        let work_path = PathBuf::from(wd);
        let wdpath = match fs::metadata(&work_path) {
            Ok(md) if md.is_dir() => work_path.canonicalize().ok(),
            _ => None,
        };
        let rp = wdpath.unwrap_or_else(|| current_dir.join(wd));
        match rp.canonicalize() {
            Ok(ap) => String::from(ap.to_str().unwrap_or("./")),
            Err(_) => {
                error!("path not found {rp:?}");
                String::from("./")
            }
        }
    }
}

pub fn get_file_path(wd: &str, path: Option<PathBuf>) -> Option<PathBuf> {
    match path {
        Some(p) => {
            if p.is_relative() {
                Some(PathBuf::from(wd).join(p))
            } else {
                Some(p)
            }
        }
        None => None,
    }
}

pub fn open_file(file_name: &PathBuf) -> Option<fs::File> {
    fs::File::open(file_name).ok()
}
