#[cfg(target_os = "windows")]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use click_probe::probe::{
        current_thread_id, request_quit, run_message_loop, ComGuard, MouseHook,
    };
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    // Diagnostics go to stderr so stdout stays a clean record stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let _com = ComGuard::init().context("accessibility subsystem unavailable")?;
    let hook = MouseHook::install().context("could not observe pointer events")?;

    let main_thread = current_thread_id();
    ctrlc::set_handler(move || request_quit(main_thread))
        .context("failed to set Ctrl+C handler")?;

    info!("watching clicks; press Ctrl+C to stop");
    run_message_loop();

    hook.uninstall();
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn main() -> anyhow::Result<()> {
    Err(click_probe::ProbeError::Unsupported.into())
}
