use crate::api::HttpHolidayApi;
use crate::data::AppSettings;
use crate::state::{FetchWorker, SearchForm};
use crate::ui::app_view::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub fn run(settings: &AppSettings) -> Result<()> {
    let api = HttpHolidayApi::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))
        .context("failed to build HTTP client")?;
    let worker = FetchWorker::new(Arc::new(api));

    let year = Local::now().year().to_string();
    let mut app = App::new(SearchForm::new(&settings.default_country, &year));
    app.start();
    info!(base_url = %settings.base_url, "starting holiday browser");

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &mut app, &worker);
    restore_terminal(&mut terminal)?;

    result
}
