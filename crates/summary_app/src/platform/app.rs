use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use summary_core::{update, AppState, Msg, QueryStatus, SummaryEndpoint};
use widget_logging::{widget_info, widget_warn, DEFAULT_LOG_FILE};

use super::cli::Cli;
use super::config::{load_config, AppConfig};
use super::effects::EffectRunner;
use super::input::{parse_line, AppEvent};
use super::ui;

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (mut config, config_error) = match load_config(&cli.config) {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    config.apply_cli(&cli);

    if cli.print_config {
        println!("{}", config.to_ron()?);
        return Ok(ExitCode::SUCCESS);
    }

    widget_logging::initialize(
        config.log.into(),
        LevelFilter::Info,
        Path::new(DEFAULT_LOG_FILE),
    );
    if let Some(err) = config_error {
        widget_warn!("Using default configuration: {:#}", err);
    }

    let endpoint = SummaryEndpoint::parse(&config.endpoint)
        .with_context(|| format!("invalid summary endpoint {:?}", config.endpoint))?;
    widget_info!("Summary endpoint: {}", endpoint.base());

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.fetch_settings(), event_tx.clone())
        .context("failed to start summary engine")?;

    let mut app = App {
        state: initial_state(endpoint, &config.default_url),
        runner,
        out: io::stdout(),
    };

    match cli.url {
        Some(url) => app.run_once(url, &event_rx),
        None => {
            spawn_stdin_reader(event_tx)?;
            app.run_interactive(&event_rx)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Fresh widget state showing `default_url`, with nothing left to render.
fn initial_state(endpoint: SummaryEndpoint, default_url: &str) -> AppState {
    let (mut state, _) = update(
        AppState::with_endpoint(endpoint),
        Msg::InputChanged(default_url.to_string()),
    );
    state.consume_dirty();
    state
}

struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> App<W> {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);

        if was_dirty {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        for line in ui::render::render(&self.state.view()) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    fn run_interactive(&mut self, events: &mpsc::Receiver<AppEvent>) -> io::Result<()> {
        writeln!(self.out, "{}", ui::constants::PROMPT_HELP)?;
        self.render()?;
        while let Ok(event) = events.recv() {
            match event {
                AppEvent::Core(msg) => self.dispatch(msg)?,
                AppEvent::Quit => break,
            }
        }
        Ok(())
    }

    /// Submits `url`, waits for its completion and reports success through
    /// the exit code.
    fn run_once(&mut self, url: String, events: &mpsc::Receiver<AppEvent>) -> anyhow::Result<ExitCode> {
        self.dispatch(Msg::InputChanged(url))?;
        self.dispatch(Msg::Submitted)?;

        while matches!(self.state.status(), QueryStatus::Loading) {
            match events.recv() {
                Ok(AppEvent::Core(msg)) => self.dispatch(msg)?,
                Ok(AppEvent::Quit) | Err(_) => break,
            }
        }

        Ok(match self.state.status() {
            QueryStatus::Succeeded { .. } => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        })
    }
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                for event in parse_line(&line) {
                    if event_tx.send(event).is_err() {
                        return;
                    }
                }
            }
            let _ = event_tx.send(AppEvent::Quit);
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use summary_core::{DEFAULT_INPUT_URL, RETRY_LATER_MESSAGE};
    use summary_engine::FetchSettings;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_app(endpoint: &str) -> (App<Vec<u8>>, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(FetchSettings::default(), tx).unwrap();
        let app = App {
            state: initial_state(SummaryEndpoint::parse(endpoint).unwrap(), DEFAULT_INPUT_URL),
            runner,
            out: Vec::new(),
        };
        (app, rx)
    }

    async fn run_once_in_background(
        mut app: App<Vec<u8>>,
        events: mpsc::Receiver<AppEvent>,
        url: &str,
    ) -> (ExitCode, String) {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            let code = app.run_once(url, &events).unwrap();
            (code, String::from_utf8(app.out).unwrap())
        })
        .await
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn one_shot_success_exits_zero_and_prints_overview() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain"))
            .and(query_param("domain_url", "http://gabeecoffee.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary_vector": "1. Company OverviewWe sell coffee.2. Core Services and Offerings..."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (app, events) = test_app(&server.uri());
        let (code, output) = run_once_in_background(app, events, "gabeecoffee.com").await;

        assert_eq!(code, ExitCode::SUCCESS);
        assert!(output.contains("Company Overview"), "output: {output}");
        assert!(output.contains("  We sell coffee."), "output: {output}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn one_shot_failure_exits_one_and_prints_retry_text() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let (app, events) = test_app(&format!("http://127.0.0.1:{port}"));
        let (code, output) = run_once_in_background(app, events, "gabeecoffee.com").await;

        assert_eq!(code, ExitCode::FAILURE);
        assert!(output.contains(RETRY_LATER_MESSAGE), "output: {output}");
        assert!(!output.contains("Company Overview"));
    }

    #[test]
    fn one_shot_blank_url_fails_without_request() {
        let (mut app, events) = test_app("http://127.0.0.1:9");
        let code = app.run_once("   ".to_string(), &events).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn unchanged_input_writes_nothing() {
        let (mut app, _events) = test_app("http://127.0.0.1:9");
        app.dispatch(Msg::InputChanged(DEFAULT_INPUT_URL.to_string()))
            .unwrap();
        assert!(app.out.is_empty());

        app.dispatch(Msg::InputChanged("other.example".to_string()))
            .unwrap();
        let output = String::from_utf8(app.out.clone()).unwrap();
        assert!(output.contains("URL: other.example  [Generate]"));
    }

    #[test]
    fn configured_default_url_is_set_without_rendering() {
        let endpoint = SummaryEndpoint::parse("http://127.0.0.1:9").unwrap();
        let mut state = initial_state(endpoint, "https://configured.example");
        assert_eq!(state.view().input, "https://configured.example");
        assert!(!state.consume_dirty());
    }

    #[test]
    fn interactive_loop_prints_help_before_first_render() {
        let (mut app, _events) = test_app("http://127.0.0.1:9");
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Core(Msg::DebugToggled)).unwrap();
        tx.send(AppEvent::Quit).unwrap();

        app.run_interactive(&rx).unwrap();

        let output = String::from_utf8(app.out).unwrap();
        assert!(output.starts_with(ui::constants::PROMPT_HELP));
        assert_eq!(output.matches(ui::constants::TITLE).count(), 2);
    }
}
