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
use vozativa_core::{repositories, usecases};

#[get("/users/profile")]
pub fn get_profile(account: Account, flash: Option<FlashMessage>) -> Markup {
    view::profile(account.user(), flash)
}

#[get("/users/profile", rank = 2)]
pub fn get_profile_anonymous() -> Flash<Redirect> {
    Flash::error(
        Redirect::to(uri!(super::login::get_login)),
        "Faça login para acessar.",
    )
}

#[derive(FromForm)]
pub struct ProfileForm<'r> {
    name: &'r str,
    profession: Option<&'r str>,
    bio: Option<&'r str>,
    avatar_url: Option<&'r str>,
}

#[post("/users/profile/edit", data = "<form>")]
pub fn post_profile_edit(
    db: Connections,
    account: Account,
    form: Form<ProfileForm<'_>>,
) -> Flash<Redirect> {
    let form = form.into_inner();
    let change = usecases::ProfileChange {
        name: form.name.to_string(),
        profession: form.profession.map(ToString::to_string),
        bio: form.bio.map(ToString::to_string),
        avatar_url: form.avatar_url.map(ToString::to_string),
    };
    let back = Redirect::to(uri!(get_profile));
    match flows::update_profile(&db, account.into_user(), change) {
        Ok(_) => Flash::success(back, "Perfil atualizado com sucesso!"),
        Err(AppError::Business(BError::Parameter(_))) => {
            Flash::error(back, "Erro ao processar os dados do formulário.")
        }
        Err(err) => {
            error!("Unable to update a profile: {err}");
            Flash::error(back, "Erro ao salvar perfil")
        }
    }
}

#[post("/users/profile/edit", rank = 2)]
pub fn post_profile_edit_anonymous() -> Redirect {
    Redirect::to(uri!(super::login::get_login))
}

#[derive(FromForm)]
pub struct PasswordForm<'r> {
    current_password: Option<&'r str>,
    new_password: Option<&'r str>,
    confirm_password: Option<&'r str>,
}

#[post("/users/profile/change-password", data = "<form>")]
pub fn post_change_password(
    db: Connections,
    account: Account,
    form: Form<PasswordForm<'_>>,
) -> Flash<Redirect> {
    let form = form.into_inner();
    let back = Redirect::to(uri!(get_profile));
    // Missing fields and a failed confirmation are answered before
    // the current password is even looked at.
    fn filled(field: Option<&str>) -> Option<&str> {
        field.filter(|value| !value.is_empty())
    }
    let (Some(current), Some(new), Some(confirmed)) = (
        filled(form.current_password),
        filled(form.new_password),
        filled(form.confirm_password),
    ) else {
        return Flash::error(back, "Preencha todos os campos de senha.");
    };
    if new != confirmed {
        return Flash::error(back, "A confirmação da nova senha não coincide.");
    }
    let change = usecases::PasswordChange {
        current_password: current.to_string(),
        new_password: new.to_string(),
        confirmed_password: confirmed.to_string(),
    };
    match flows::change_password(&db, account.into_user(), change) {
        Ok(()) => Flash::success(back, "Senha alterada com sucesso!"),
        Err(AppError::Business(BError::Parameter(usecases::Error::Credentials))) => {
            Flash::error(back, "Senha atual incorreta.")
        }
        Err(AppError::Business(BError::Parameter(usecases::Error::Password))) => {
            Flash::error(back, "Senha muito curta (mínimo 4 caracteres)!")
        }
        Err(err) => {
            error!("Unable to change a password: {err}");
            Flash::error(back, "Erro interno ao mudar senha.")
        }
    }
}

#[post("/users/profile/change-password", rank = 2)]
pub fn post_change_password_anonymous() -> Redirect {
    Redirect::to(uri!(super::login::get_login))
}

#[allow(clippy::result_large_err)]
#[get("/users/perfil/<id>")]
pub fn get_public_profile(
    db: Connections,
    account: Option<Account>,
    id: &str,
    flash: Option<FlashMessage>,
) -> std::result::Result<Markup, Flash<Redirect>> {
    let home = || Redirect::to(uri!(super::get_index));
    let db = db.shared().map_err(|err| {
        error!("Unable to load the profile of '{id}': {err}");
        Flash::error(home(), "Erro interno ao carregar o perfil.")
    })?;
    match usecases::public_profile(&db, id) {
        Ok(profile) => Ok(view::public_profile(
            account.as_ref().map(Account::user),
            &profile,
            flash,
        )),
        Err(usecases::Error::Repo(repositories::Error::NotFound)) => {
            Err(Flash::error(home(), "Este usuário não foi encontrado."))
        }
        Err(err) => {
            error!("Unable to load the profile of '{id}': {err}");
            Err(Flash::error(home(), "Erro interno ao carregar o perfil."))
        }
    }
}
