use maud::Markup;
use rocket::{
    self,
    form::Form,
    get, post,
    request::FlashMessage,
    response::{Flash, Redirect},
    uri, FromForm, State,
};

use super::view::{self, RegisterPrefill};
use crate::web::{guards::*, sqlite::Connections, Cfg};
use vozativa_application::{
    error::{AppError, BError},
    prelude as flows,
};
use vozativa_core::{
    entities::MIN_PASSWORD_LEN, gateways::verify::VerificationError, usecases, util::validate,
};

#[derive(FromForm)]
pub struct RegisterForm<'r> {
    name: &'r str,
    email: &'r str,
    password: &'r str,
    confirm_password: &'r str,
    profession: Option<&'r str>,
    bio: Option<&'r str>,
    avatar_url: Option<&'r str>,
    #[field(name = "g-recaptcha-response")]
    verification_token: Option<&'r str>,
}

#[get("/users/register")]
pub fn get_register(flash: Option<FlashMessage>, cfg: &State<Cfg>) -> Markup {
    view::register(
        flash,
        &[],
        &RegisterPrefill::default(),
        cfg.verification_site_key(),
    )
}

/// Validation failures re-render the form inline with the typed
/// values, only a successful registration redirects.
#[post("/users/register", data = "<form>")]
pub async fn post_register(
    db: Connections,
    auth: Auth,
    cfg: &State<Cfg>,
    verify: &State<Verify>,
    form: Form<RegisterForm<'_>>,
) -> std::result::Result<Flash<Redirect>, Markup> {
    let form = form.into_inner();
    let prefill = RegisterPrefill {
        name: form.name,
        email: form.email,
        profession: form.profession.unwrap_or_default(),
        bio: form.bio.unwrap_or_default(),
    };
    let site_key = cfg.verification_site_key();
    let render_errors =
        |errors: &[String]| view::register(None, errors, &prefill, site_key);

    // The token has to pass before the form is even looked at.
    if cfg.bot_check {
        let gateway = verify.gateway();
        let token = form.verification_token.unwrap_or_default().to_string();
        let client_ip = auth.client_ip();
        let verdict =
            rocket::tokio::task::spawn_blocking(move || gateway.verify_token(&token, client_ip))
                .await;
        match verdict {
            Ok(Ok(())) => (),
            Ok(Err(VerificationError::Unavailable(err))) => {
                error!("Verification service unavailable: {err}");
                return Err(render_errors(&["Erro interno ao processar cadastro.".into()]));
            }
            Ok(Err(err)) => {
                info!("Rejected registration attempt: {err}");
                return Err(render_errors(&[
                    "Falha na verificação de segurança. Tente novamente.".into(),
                ]));
            }
            Err(err) => {
                error!("Verification task failed: {err}");
                return Err(render_errors(&["Erro interno ao processar cadastro.".into()]));
            }
        }
    }

    let mut errors = Vec::new();
    if validate::non_blank(form.name).is_none() {
        errors.push("Nome inválido!".to_string());
    }
    if !validate::is_valid_email(form.email) {
        errors.push("E-mail inválido!".to_string());
    }
    if form.password.trim().len() < MIN_PASSWORD_LEN {
        errors.push("Senha muito curta (mínimo 4 caracteres)!".to_string());
    }
    if form.password != form.confirm_password {
        errors.push("As senhas não coincidem!".to_string());
    }
    if !errors.is_empty() {
        return Err(render_errors(&errors));
    }

    let new_citizen = usecases::NewCitizen {
        name: form.name.to_string(),
        email: form.email.to_string(),
        password: form.password.to_string(),
        confirmed_password: form.confirm_password.to_string(),
        profession: form.profession.map(ToString::to_string),
        bio: form.bio.map(ToString::to_string),
        avatar_url: form.avatar_url.map(ToString::to_string),
    };
    match flows::register_citizen(&db, new_citizen) {
        Ok(_) => Ok(Flash::success(
            Redirect::to(uri!(super::login::get_login)),
            "Usuário criado com sucesso!",
        )),
        Err(AppError::Business(BError::Parameter(usecases::Error::UserExists))) => Err(
            render_errors(&["Já existe uma conta com este e-mail.".into()]),
        ),
        Err(err) => {
            error!("Unable to register '{}': {err}", form.email);
            Err(render_errors(&["Erro interno ao processar cadastro.".into()]))
        }
    }
}
