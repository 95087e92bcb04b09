//! Binary entry point: read the configuration, start logging, build the
//! contact store (memory-only unless persistence is switched on), and drive
//! the Ratatui event loop until the user exits.
use contact_collector::logging::init_tracing;
use contact_collector::{run_app, App, Config, ContactArchive, ContactStore, DirectoryDelivery};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config)?;

    let store = if config.persist {
        match ContactArchive::open(&config.data_dir) {
            Ok(archive) => ContactStore::with_archive(archive),
            Err(err) => {
                tracing::warn!(error = %err, "local archive unavailable, keeping contacts in memory");
                ContactStore::new()
            }
        }
    } else {
        ContactStore::new()
    };
    let sink = DirectoryDelivery::new(&config.export_dir);
    tracing::info!(
        persist = config.persist,
        export_dir = %sink.dir().display(),
        "session started"
    );

    let mut app = App::new(store, Box::new(sink));
    let result = run_app(&mut app);
    tracing::info!(left_in_list = app.store().len(), "session ended");
    result
}
