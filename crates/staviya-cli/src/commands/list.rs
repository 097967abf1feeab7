use anyhow::Result;

use staviya_core::content::{open_store, CollectionLoader, ContentItem};
use staviya_core::{Anchor, AppConfig};
use staviya_tui::motion::EntrancePreset;

pub async fn run(config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    println!("Source: {}\n", store.describe());

    let loader = CollectionLoader::new(store);
    let state = loader.load_all().await?;

    for anchor in Anchor::ALL {
        let Some(collection) = anchor.collection() else {
            continue;
        };
        let items = state.items(collection);
        println!(
            "#{} - {} ({} items from '{}')",
            anchor.id(),
            anchor.label(),
            items.len(),
            collection
        );

        if items.is_empty() {
            println!("  (empty)\n");
            continue;
        }

        let preset = EntrancePreset::for_collection(collection);
        for (index, item) in items.iter().enumerate() {
            println!(
                "  +{:>4}ms  {}",
                preset.delay(index).as_millis(),
                describe(item)
            );
            if let Some(link) = item.link() {
                println!("           {}", link);
            }
        }
        println!();
    }

    Ok(())
}

fn describe(item: &ContentItem) -> String {
    let title = item.title().unwrap_or("(no title)");
    match item {
        ContentItem::Milestone(m) => match m.year {
            Some(year) => format!("{} {}", year, title),
            None => title.to_string(),
        },
        ContentItem::Stat(s) => match s.display_value() {
            Some(value) => format!("{} {}", value, title),
            None => title.to_string(),
        },
        ContentItem::Technology(t) => match t.category.as_deref() {
            Some(category) => format!("{} [{}]", title, category),
            None => title.to_string(),
        },
        ContentItem::Service(_) => title.to_string(),
    }
}
