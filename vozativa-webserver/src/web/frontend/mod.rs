use maud::Markup;
use rocket::{
    self, get,
    request::FlashMessage,
    response::{content::RawCss, Flash, Redirect},
    routes, uri, Route,
};

use crate::web::{guards::*, sqlite};
use vozativa_core::{entities::ItemKind, usecases};

mod listings;
mod login;
mod profile;
mod register;
mod reports;
mod requests;
mod view;


const MAIN_CSS: &str = include_str!("main.css");

#[get("/")]
pub fn get_index(account: Option<Account>, flash: Option<FlashMessage>) -> Markup {
    view::index(account.as_ref().map(Account::user), flash)
}

#[get("/categories")]
pub fn get_categories(account: Option<Account>, flash: Option<FlashMessage>) -> Markup {
    view::categories(account.as_ref().map(Account::user), flash)
}

#[get("/main.css")]
pub fn get_main_css() -> RawCss<&'static str> {
    RawCss(MAIN_CSS)
}

#[get("/admin")]
pub fn get_admin(account: AdminAccount) -> Markup {
    view::admin(account.user())
}

#[get("/admin", rank = 2)]
pub fn get_admin_denied() -> Flash<Redirect> {
    permission_denied()
}

/// All confidential reports, newest first, for moderation.
#[allow(clippy::result_large_err)]
#[get("/admin/painel")]
pub fn get_admin_panel(
    db: sqlite::Connections,
    account: AdminAccount,
    flash: Option<FlashMessage>,
) -> std::result::Result<Markup, Flash<Redirect>> {
    let reports = db
        .shared()
        .and_then(|db| Ok(usecases::load_hub(&db, ItemKind::Report)?))
        .map_err(|err| {
            error!("Unable to load the admin panel: {err}");
            Flash::error(Redirect::to(uri!(get_index)), "Erro ao carregar o painel")
        })?;
    Ok(view::admin_panel(account.user(), &reports, flash))
}

#[get("/admin/painel", rank = 2)]
pub fn get_admin_panel_denied() -> Flash<Redirect> {
    permission_denied()
}

fn permission_denied() -> Flash<Redirect> {
    Flash::error(
        Redirect::to(uri!(get_index)),
        "Você não possui permissão para acessar essa página",
    )
}

fn login_required() -> Flash<Redirect> {
    Flash::error(
        Redirect::to(uri!(login::get_login)),
        "Você precisa realizar login para acessar essa página",
    )
}

/// The upload widget submits the stored asset URLs one per line.
fn split_image_urls(field: Option<&str>) -> Vec<String> {
    field
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn routes() -> Vec<Route> {
    routes![
        get_index,
        get_categories,
        get_main_css,
        get_admin,
        get_admin_denied,
        get_admin_panel,
        get_admin_panel_denied,
        login::get_login,
        login::post_login,
        login::get_logout,
        register::get_register,
        register::post_register,
        profile::get_profile,
        profile::get_profile_anonymous,
        profile::post_profile_edit,
        profile::post_profile_edit_anonymous,
        profile::post_change_password,
        profile::post_change_password_anonymous,
        profile::get_public_profile,
        requests::get_about,
        requests::get_new_request,
        requests::get_new_request_anonymous,
        requests::post_new_request,
        requests::post_new_request_anonymous,
        requests::get_hub,
        requests::get_detail,
        requests::post_like,
        requests::post_like_anonymous,
        requests::post_comment,
        requests::post_comment_anonymous,
        reports::get_about,
        reports::get_new_report,
        reports::get_new_report_anonymous,
        reports::post_new_report,
        reports::post_new_report_anonymous,
        reports::get_hub,
        reports::get_detail,
        reports::post_like,
        reports::post_like_anonymous,
        reports::post_comment,
        reports::post_comment_anonymous,
        listings::get_about,
        listings::get_new_listing,
        listings::get_new_listing_anonymous,
        listings::post_new_listing,
        listings::post_new_listing_anonymous,
        listings::get_hub,
        listings::get_detail,
        listings::post_like,
        listings::post_like_anonymous,
        listings::post_comment,
        listings::post_comment_anonymous,
    ]
}
