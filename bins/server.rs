use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};

fn init_logging() {
    // .env first so RUST_LOG / LOG_FORMAT apply
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "showcase", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> ExitCode {
    init_logging();

    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "showcase", event = "panic", pid, message = %info, "unhandled panic occurred");
    }));

    let worker_threads = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "showcase", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "showcase",
        event = "start",
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "showcase api starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(async move {
            server::run().await.map_err(|e| {
                error!(service = "showcase", event = "run_failed", error = %e, "server::run returned error");
                e
            })
        });

        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(service = "showcase", event = "stop", pid, "server stopped normally");
                    ExitCode::SUCCESS
                }
                // already logged inside the task
                Ok(Err(_)) => ExitCode::FAILURE,
                Err(e) => {
                    error!(service = "showcase", event = "task_join_error", error = %e, "server task join error");
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "showcase", event = "shutdown_signal", pid, "received Ctrl+C, shutting down");
                ExitCode::SUCCESS
            }
        }
    })
}
