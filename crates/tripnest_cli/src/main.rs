//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `tripnest_core` linkage without the Flutter/FFI runtime.
//! - Evaluate one activity from the command line against the device clock.
//!
//! Usage: `tripnest_cli [trip|relocation] [START] [END] [CONTENTS_JSON...]`

use std::process::ExitCode;
use tripnest_core::{
    parse_raw_contents, ActivityKind, ItineraryService, MemoryItineraryRepository,
    ScheduledActivity, SystemClock,
};

fn main() -> ExitCode {
    println!("tripnest_core ping={}", tripnest_core::ping());
    println!("tripnest_core version={}", tripnest_core::core_version());

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(kind_arg) = args.first() else {
        return ExitCode::SUCCESS;
    };
    let Some(kind) = ActivityKind::parse(kind_arg) else {
        eprintln!("unsupported activity kind `{kind_arg}`; expected trip|relocation");
        return ExitCode::FAILURE;
    };

    let start = args.get(1).map(String::as_str);
    let end = args.get(2).map(String::as_str);
    let mut repo = MemoryItineraryRepository::new();
    let id = repo.upsert_activity(ScheduledActivity::new(kind).with_schedule(start, end));
    for raw in args.iter().skip(3) {
        if let Err(err) = repo.add_unit(id, &parse_raw_contents(raw)) {
            eprintln!("failed to add packing unit: {err}");
            return ExitCode::FAILURE;
        }
    }

    match ItineraryService::new(&repo, SystemClock).evaluate(id) {
        Ok(view) => {
            let report = serde_json::json!({
                "status": view.status,
                "summary": view.summary,
                "permissions": view.permissions,
            });
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("evaluation failed: {err}");
            ExitCode::FAILURE
        }
    }
}
