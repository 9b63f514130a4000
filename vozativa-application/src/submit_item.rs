use super::*;

pub fn submit_request(
    connections: &sqlite::Connections,
    author: &User,
    new_request: usecases::NewRequest,
) -> Result<ContentItem> {
    let db = connections.exclusive()?;
    let item = usecases::submit_request(&db, author, new_request).map_err(|err| {
        info!("Rejected improvement request: {err}");
        err
    })?;
    Ok(item)
}

pub fn submit_report(
    connections: &sqlite::Connections,
    author: &User,
    new_report: usecases::NewReport,
) -> Result<ContentItem> {
    let db = connections.exclusive()?;
    let item = usecases::submit_report(&db, author, new_report).map_err(|err| {
        info!("Rejected confidential report: {err}");
        err
    })?;
    Ok(item)
}

pub fn publish_listing(
    connections: &sqlite::Connections,
    author: &User,
    new_listing: usecases::NewListing,
) -> Result<ContentItem> {
    let db = connections.exclusive()?;
    let item = usecases::publish_listing(&db, author, new_listing).map_err(|err| {
        info!("Rejected service listing: {err}");
        err
    })?;
    Ok(item)
}
