use crate::app::{AppContext, Result};

pub async fn list_entries(ctx: &AppContext) -> Result<()> {
    let entries = ctx.source.fetch_all(false).await?;

    if entries.is_empty() {
        println!("No entries. Add feeds to the config file first.");
        return Ok(());
    }

    for entry in &entries {
        println!("{:<20} {}", entry.feed_name, entry.display_title());
    }

    Ok(())
}

pub async fn update_feeds(ctx: &AppContext) -> Result<()> {
    let entries = ctx.source.fetch_all(true).await?;

    let mut current: Option<(&str, usize)> = None;
    for entry in &entries {
        match &mut current {
            Some((name, count)) if *name == entry.feed_name => *count += 1,
            _ => {
                if let Some((name, count)) = current.take() {
                    println!("{:<20} {} entries", name, count);
                }
                current = Some((&entry.feed_name, 1));
            }
        }
    }
    if let Some((name, count)) = current {
        println!("{:<20} {} entries", name, count);
    }

    println!("Fetched {} entries", entries.len());
    Ok(())
}
