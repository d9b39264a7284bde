use crate::domain::model::{ModelOutput, Scenario};
use crate::domain::ports::{ConfigProvider, ModelRunner};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use std::io::{PipeReader, Read};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::oneshot;

/// 以子程序執行外部定價模型：`<program> <args...> <amount> <horizon> <rate>`
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            timeout: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut runner = Self::new(config.program())
            .with_args(config.model_args().to_vec())
            .with_timeout(config.timeout());
        if let Some(dir) = config.working_dir() {
            runner = runner.with_working_dir(dir);
        }
        runner
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

/// 整數利率也保留一位小數，例如 `1.0`
pub fn format_rate(rate: f64) -> String {
    if rate.is_finite() && rate.fract() == 0.0 {
        format!("{:.1}", rate)
    } else {
        rate.to_string()
    }
}

/// stdout 與 stderr 共用同一條管線，輸出順序與 `2>&1` 相同
fn shared_pipe() -> std::io::Result<(PipeReader, Stdio, Stdio)> {
    let (reader, writer) = std::io::pipe()?;
    let err_writer = writer.try_clone()?;
    Ok((reader, writer.into(), err_writer.into()))
}

fn spawn_reader(mut reader: PipeReader) -> oneshot::Receiver<std::io::Result<Vec<u8>>> {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let result = reader.read_to_end(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });
    rx
}

#[async_trait]
impl ModelRunner for CommandRunner {
    async fn run(&self, amount: Scenario, horizon: u32, rate: f64) -> Result<ModelOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(amount.to_string())
            .arg(horizon.to_string())
            .arg(format_rate(rate))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(
            "Running model: {} {:?} {} {} {}",
            self.program,
            self.args,
            amount,
            horizon,
            format_rate(rate)
        );

        let spawn_error = |source: std::io::Error| ReportError::ModelSpawnError {
            program: self.program.clone(),
            source,
        };

        let (reader, stdout, stderr) = shared_pipe().map_err(spawn_error)?;
        cmd.stdout(stdout).stderr(stderr);
        let mut child = cmd.spawn().map_err(spawn_error)?;
        // 寫端只能留在子程序，否則讀端永遠等不到 EOF
        drop(cmd);
        let output = spawn_reader(reader);

        let collect = async {
            let status = child.wait().await?;
            let bytes = output
                .await
                .map_err(|_| std::io::Error::other("model output reader stopped"))??;
            Ok::<_, std::io::Error>((status, bytes))
        };

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, collect).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(ReportError::ModelTimeoutError {
                        program: self.program.clone(),
                        seconds: limit.as_secs(),
                    })
                }
            },
            None => collect.await,
        };

        let (status, bytes) = result.map_err(spawn_error)?;

        Ok(ModelOutput {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            exit_code: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::scrape_price;
    use crate::domain::model::PriceLookup;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(1.0), "1.0");
        assert_eq!(format_rate(2.0), "2.0");
        assert_eq!(format_rate(1.25), "1.25");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_passes_fixed_arguments() {
        let runner = CommandRunner::new("sh").with_args(vec![
            "-c".to_string(),
            "echo \"$1 $2 $3\"".to_string(),
            "model".to_string(),
        ]);

        let output = runner.run(50_000, 10, 1.0).await.unwrap();
        assert_eq!(output.text, "50000 10 1.0\n");
        assert_eq!(output.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_stderr_and_exit_code() {
        let runner = CommandRunner::new("sh").with_args(vec![
            "-c".to_string(),
            "echo '1 $1.1000'; echo 'oops' >&2; exit 3".to_string(),
        ]);

        let output = runner.run(10_000, 10, 1.0).await.unwrap();
        assert!(output.text.starts_with("1 $1.1000\n"));
        assert!(output.text.contains("oops"));
        assert_eq!(output.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_keeps_interleaved_stream_order() {
        let runner = CommandRunner::new("sh").with_args(vec![
            "-c".to_string(),
            "echo '3 $9.0000' >&2; sleep 0.2; echo '3 $1.5000'".to_string(),
        ]);

        let output = runner.run(10_000, 10, 1.0).await.unwrap();
        assert_eq!(output.text, "3 $9.0000\n3 $1.5000\n");
        assert_eq!(scrape_price(&output.text, 3), PriceLookup::Found(9.0));
    }

    #[tokio::test]
    async fn test_run_missing_program_is_spawn_error() {
        let runner = CommandRunner::new("definitely-not-a-pricing-model-binary");
        let err = runner.run(10_000, 10, 1.0).await.unwrap_err();
        assert!(matches!(err, ReportError::ModelSpawnError { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let runner = CommandRunner::new("sh")
            .with_args(vec!["-c".to_string(), "sleep 5".to_string()])
            .with_timeout(Some(Duration::from_millis(200)));

        let err = runner.run(10_000, 10, 1.0).await.unwrap_err();
        assert!(matches!(err, ReportError::ModelTimeoutError { .. }));
    }
}
