use super::*;

pub fn add_comment(
    connections: &sqlite::Connections,
    author: &User,
    new_comment: usecases::NewComment,
) -> Result<Comment> {
    let db = connections.exclusive()?;
    let comment = usecases::add_comment(&db, author, new_comment).map_err(|err| {
        info!("Rejected comment: {err}");
        err
    })?;
    Ok(comment)
}
