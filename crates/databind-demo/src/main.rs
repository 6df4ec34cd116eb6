#![forbid(unsafe_code)]

//! databind demo binary entry point.

use databind_demo::cli;
use databind_demo::model::PersonModel;
use databind_demo::view::{PersonView, reject_blank_names};
use databind_demo::view_model::PersonViewModel;
use tracing_subscriber::EnvFilter;

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("Invalid log filter {filter:?}: {err}; using 'info'");
        EnvFilter::new("info")
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn main() {
    let opts = cli::Opts::parse();
    init_logging(&opts.log_filter);

    let mut person = PersonModel::default();
    let view = PersonView::default();

    {
        let mut bindings = PersonViewModel::new(&mut person);
        if opts.reject_blank {
            bindings.subscribe_pre(reject_blank_names(), false);
        }

        let pre_handle = bindings.subscribe_pre(view.on_pre_name_change(), true);
        bindings.subscribe_post(view.on_post_name_change(), false);

        let _ = bindings.change_name(&opts.first_name, &opts.last_name);

        if let Err(err) = bindings.unsubscribe(pre_handle) {
            tracing::error!(error = %err, "failed to release pre-transform handler");
            std::process::exit(1);
        }

        let _ = bindings.change_name(&opts.then_first_name, &opts.then_last_name);
    }

    tracing::debug!(person = %person, "final state");
    println!("END");
}
