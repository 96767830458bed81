use crate::cli::ViewArgs;
use crate::demo;
use crate::render::{render_json, render_text, ViewReport};
use fortia_grid::config::AppConfig;
use fortia_grid::error::AppError;
use fortia_grid::grid::{wait_for_mount, Row, TableController, TableSurface};
use fortia_grid::telemetry;
use fortia_grid::views::ViewKind;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

const SETTLE_POLL: Duration = Duration::from_millis(10);

pub(crate) async fn run_view(kind: ViewKind, args: ViewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let ViewArgs {
        snapshot,
        search,
        selections,
        sort,
        typing_interval_ms,
        actions,
        json,
    } = args;

    let rows = match snapshot {
        Some(path) => kind.load_path(path)?,
        None => demo::rows(kind),
    };
    info!(view = kind.label(), rows = rows.len(), ?config.environment, "snapshot loaded");

    let body = TableSurface::with_rows(rows.iter().map(Row::id));
    let surface = wait_for_mount(
        || body.is_attached().then(|| body.clone()),
        config.grid.mount_policy(),
    )
    .await?;

    let mut controller = TableController::new(kind.schema(), surface, config.grid.search_delay());
    controller.refresh(rows)?;

    for (field, value) in selections {
        controller.select(&field, value)?;
    }
    if let Some(key) = sort {
        controller.set_sort(key)?;
    }
    if let Some(query) = search {
        let typing_interval = typing_interval_ms.map(Duration::from_millis);
        type_search(&mut controller, &query, typing_interval).await?;
    }

    let report = ViewReport::new(kind, &controller, &actions);
    controller.teardown();

    if json {
        render_json(&report)?;
    } else {
        render_text(&report);
    }
    Ok(())
}

/// Feeds `query` into the search box, one prefix per keystroke when an
/// interval is given, then waits for the debounced evaluation to land.
async fn type_search(
    controller: &mut TableController<TableSurface>,
    query: &str,
    typing_interval: Option<Duration>,
) -> Result<(), AppError> {
    match typing_interval {
        Some(interval) => {
            let boundaries = query
                .char_indices()
                .map(|(index, ch)| index + ch.len_utf8());
            for end in boundaries {
                controller.input_search(&query[..end])?;
                sleep(interval).await;
            }
        }
        None => controller.input_search(query)?,
    }

    while controller.has_pending_search() {
        sleep(SETTLE_POLL).await;
    }
    debug!(query, "search settled");
    Ok(())
}
