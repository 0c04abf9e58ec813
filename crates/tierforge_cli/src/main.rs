//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tierforge_core` wiring end to
//!   end: template store, session load, export render.
//! - Keep output deterministic for quick local sanity checks.

use std::error::Error;

use tierforge_core::db::open_db_in_memory;
use tierforge_core::{
    export_file_name, NewTemplateItem, SqliteTemplateRepository, TemplateRepository,
    TierlistSession,
};

fn main() -> Result<(), Box<dyn Error>> {
    println!("tierforge_core version={}", tierforge_core::core_version());

    let conn = open_db_in_memory()?;
    let repo = SqliteTemplateRepository::try_new(&conn)?;
    let template = repo.create_template(
        "Smoke Template",
        &[
            NewTemplateItem {
                image_url: "https://example.com/a.png".to_string(),
            },
            NewTemplateItem {
                image_url: "https://example.com/b.png".to_string(),
            },
        ],
    )?;

    let mut session = TierlistSession::load_from_store(&repo, template.template_uuid)?;
    let document = session.begin_export(0)?;
    session.finish_export();

    println!(
        "template={} items={} tiers={} file={}",
        template.name,
        session.catalog().len(),
        document.sections.len(),
        export_file_name(Some(&template.name), document.generated_at_ms)
    );
    Ok(())
}
