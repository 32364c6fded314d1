//! 文件扫描模块
//!
//! analyze 目录模式下递归收集音频文件。

use super::constants::AUDIO_EXTENSIONS;
use super::utils::has_extension;
use crate::error::{MasteringError, MasteringResult};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 递归扫描目录中的音频文件，按路径排序
pub fn scan_audio_files(dir_path: &Path) -> MasteringResult<Vec<PathBuf>> {
    if !dir_path.exists() {
        return Err(MasteringError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Directory not found / 目录不存在: {}", dir_path.display()),
        )));
    }

    if !dir_path.is_dir() {
        return Err(MasteringError::InvalidInput(format!(
            "Not a directory / 路径不是目录: {}",
            dir_path.display()
        )));
    }

    let mut audio_files = Vec::new();
    for entry in WalkDir::new(dir_path).follow_links(true) {
        let entry = entry.map_err(|e| {
            MasteringError::Io(
                e.into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed / 目录遍历失败")),
            )
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), AUDIO_EXTENSIONS) {
            audio_files.push(entry.into_path());
        }
    }

    audio_files.sort();
    Ok(audio_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_recursive_sorted_and_filtered() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("disc2")).unwrap();
        fs::write(root.join("b.wav"), b"").unwrap();
        fs::write(root.join("a.FLAC"), b"").unwrap();
        fs::write(root.join("cover.jpg"), b"").unwrap();
        fs::write(root.join("disc2/01.mp3"), b"").unwrap();

        let files = scan_audio_files(root).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, ["a.FLAC", "b.wav", "disc2/01.mp3"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let err = scan_audio_files(Path::new("/nonexistent/mastering-cli-dir")).unwrap_err();
        assert!(matches!(err, MasteringError::Io(_)));
    }

    #[test]
    fn test_scan_file_is_not_directory() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("x.wav");
        fs::write(&file, b"").unwrap();
        let err = scan_audio_files(&file).unwrap_err();
        assert!(matches!(err, MasteringError::InvalidInput(_)));
    }
}
