use maud::Markup;
use rocket::{
    self,
    form::Form,
    get, post,
    request::FlashMessage,
    response::{Flash, Redirect},
    uri, FromForm,
};

use super::view;
use crate::web::{guards::*, sqlite::Connections};
use vozativa_application::{
    error::{AppError, BError},
    prelude as flows,
};
use vozativa_core::{
    entities::{Id, ItemKind},
    repositories, usecases,
};

#[get("/categories/denuncias_sigilosas/saiba-mais")]
pub fn get_about(account: Option<Account>) -> Markup {
    view::about_reports(account.as_ref().map(Account::user))
}

#[get("/categories/denuncias_sigilosas/abrir-denuncia")]
pub fn get_new_report(account: Account, flash: Option<FlashMessage>) -> Markup {
    view::report_form(account.user(), flash)
}

#[get("/categories/denuncias_sigilosas/abrir-denuncia", rank = 2)]
pub fn get_new_report_anonymous() -> Flash<Redirect> {
    super::login_required()
}

#[derive(FromForm)]
pub struct ReportForm<'r> {
    occurrence: &'r str,
    title: Option<&'r str>,
    description: &'r str,
    address: &'r str,
    video_url: Option<&'r str>,
    lat: Option<f64>,
    lng: Option<f64>,
    image_urls: Option<&'r str>,
}

#[post("/categories/denuncias_sigilosas/abrir-denuncia", data = "<form>")]
pub fn post_new_report(
    db: Connections,
    account: Account,
    form: Form<ReportForm<'_>>,
) -> Flash<Redirect> {
    let form = form.into_inner();
    // The occurrence type doubles as the title, a free-text title is
    // only accepted for the "Outro" type.
    let title = if form.occurrence == "Outro" {
        form.title.unwrap_or_default()
    } else {
        form.occurrence
    };
    let new_report = usecases::NewReport {
        title: title.to_string(),
        description: form.description.to_string(),
        occurrence: form.occurrence.to_string(),
        address: form.address.to_string(),
        lat: form.lat,
        lng: form.lng,
        image_urls: super::split_image_urls(form.image_urls),
        video_url: form.video_url.map(ToString::to_string),
    };
    match flows::submit_report(&db, account.user(), new_report) {
        Ok(_) => Flash::success(
            Redirect::to(uri!(get_hub)),
            "Denúncia enviada com sucesso!",
        ),
        Err(err) => {
            warn!("Unable to submit a confidential report: {err}");
            Flash::error(
                Redirect::to(uri!(get_new_report)),
                "Erro ao enviar a denúncia. Tente novamente.",
            )
        }
    }
}

#[post("/categories/denuncias_sigilosas/abrir-denuncia", rank = 2)]
pub fn post_new_report_anonymous() -> Flash<Redirect> {
    super::login_required()
}

#[allow(clippy::result_large_err)]
#[get("/categories/denuncias_sigilosas/hub")]
pub fn get_hub(
    db: Connections,
    account: Option<Account>,
    flash: Option<FlashMessage>,
) -> std::result::Result<Markup, Flash<Redirect>> {
    let items = db
        .shared()
        .and_then(|db| Ok(usecases::load_hub(&db, ItemKind::Report)?))
        .map_err(|err| {
            error!("Unable to load the confidential reports: {err}");
            Flash::error(
                Redirect::to(uri!(super::get_index)),
                "Erro interno. Tente novamente mais tarde.",
            )
        })?;
    Ok(view::reports_hub(
        account.as_ref().map(Account::user),
        &items,
        flash,
    ))
}

#[allow(clippy::result_large_err)]
#[get("/categories/denuncias_sigilosas/detalhes/<id>")]
pub fn get_detail(
    db: Connections,
    account: Option<Account>,
    id: &str,
    flash: Option<FlashMessage>,
) -> std::result::Result<Markup, Flash<Redirect>> {
    let hub = || Redirect::to(uri!(get_hub));
    let db = db.shared().map_err(|err| {
        error!("Unable to load item '{id}': {err}");
        Flash::error(hub(), "Erro interno ao carregar detalhes.")
    })?;
    match usecases::load_item_page(&db, id) {
        Ok(page_data) if page_data.item.kind() == ItemKind::Report => Ok(view::report_detail(
            account.as_ref().map(Account::user),
            &page_data,
            flash,
        )),
        Ok(_) | Err(usecases::Error::Repo(repositories::Error::NotFound)) => {
            Err(Flash::error(hub(), "Esta denúncia não foi encontrada."))
        }
        Err(err) => {
            error!("Unable to load item '{id}': {err}");
            Err(Flash::error(hub(), "Erro interno ao carregar detalhes."))
        }
    }
}

#[allow(clippy::result_large_err)]
#[post("/categories/denuncias_sigilosas/like/<id>")]
pub fn post_like(
    db: Connections,
    account: Account,
    referer: Referer,
    id: &str,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let hub = || Redirect::to(uri!(get_hub));
    match flows::toggle_like(&db, &Id::from(id), &account.user().id) {
        Ok(_) => {
            let fallback = uri!(get_hub).to_string();
            Ok(Redirect::to(referer.or(&fallback)))
        }
        Err(AppError::Business(BError::Parameter(usecases::Error::Repo(
            repositories::Error::NotFound,
        )))) => Err(Flash::error(hub(), "Esta denúncia não foi encontrada.")),
        Err(err) => {
            error!("Unable to toggle a like on item '{id}': {err}");
            Err(Flash::error(
                hub(),
                "Erro interno. Tente novamente mais tarde.",
            ))
        }
    }
}

#[post("/categories/denuncias_sigilosas/like/<_id>", rank = 2)]
pub fn post_like_anonymous(_id: &str) -> Flash<Redirect> {
    Flash::error(
        Redirect::to(uri!(super::login::get_login)),
        "Você precisa estar logado para curtir.",
    )
}

#[derive(FromForm)]
pub struct CommentForm<'r> {
    text: &'r str,
}

#[allow(clippy::result_large_err)]
#[post("/categories/denuncias_sigilosas/comentar/<id>", data = "<form>")]
pub fn post_comment(
    db: Connections,
    account: Account,
    referer: Referer,
    id: &str,
    form: Form<CommentForm<'_>>,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let new_comment = usecases::NewComment {
        item_id: Id::from(id),
        text: form.text.to_string(),
    };
    match flows::add_comment(&db, account.user(), new_comment) {
        Ok(_) => {
            let fallback = uri!(get_detail(id)).to_string();
            Ok(Redirect::to(referer.or(&fallback)))
        }
        Err(AppError::Business(BError::Parameter(usecases::Error::EmptyComment))) => {
            Err(Flash::error(
                Redirect::to(uri!(get_detail(id))),
                "O comentário não pode estar vazio.",
            ))
        }
        Err(AppError::Business(BError::Parameter(usecases::Error::Repo(
            repositories::Error::NotFound,
        )))) => Err(Flash::error(
            Redirect::to(uri!(get_hub)),
            "Esta denúncia não foi encontrada.",
        )),
        Err(err) => {
            error!("Unable to comment on item '{id}': {err}");
            Err(Flash::error(
                Redirect::to(uri!(get_hub)),
                "Erro interno. Tente novamente mais tarde.",
            ))
        }
    }
}

#[post("/categories/denuncias_sigilosas/comentar/<_id>", rank = 2)]
pub fn post_comment_anonymous(_id: &str) -> Flash<Redirect> {
    Flash::error(
        Redirect::to(uri!(super::login::get_login)),
        "Você precisa estar logado para comentar.",
    )
}
