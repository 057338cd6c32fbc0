use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use super::RelayError;

/// Convert a Telegram voice note (OGG/Opus) to WAV with ffmpeg.
pub async fn ogg_to_wav(ffmpeg: &str, input: &Path, output: &Path) -> Result<(), RelayError> {
    debug!("Converting {} to {}", input.display(), output.display());

    let result = Command::new(ffmpeg)
        .arg("-y")
        .args(["-loglevel", "error"])
        .arg("-i")
        .arg(input)
        .args(["-f", "wav"])
        .arg(output)
        .output()
        .await?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(RelayError::Transcode(format!(
            "ffmpeg exited with {}: {}",
            result.status,
            stderr.trim()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn missing_ffmpeg_binary_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ogg_to_wav(
            "/nonexistent/ffmpeg",
            &dir.path().join("in.ogg"),
            &dir.path().join("out.wav"),
        )
        .await;

        assert!(matches!(result, Err(RelayError::Io(_))));
    }
}
