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

#[get("/categories/gestao_de_melhorias/saiba-mais")]
pub fn get_about(account: Option<Account>) -> Markup {
    view::about_requests(account.as_ref().map(Account::user))
}

#[get("/categories/gestao_de_melhorias/abrir-chamado")]
pub fn get_new_request(account: Account, flash: Option<FlashMessage>) -> Markup {
    view::request_form(account.user(), flash)
}

#[get("/categories/gestao_de_melhorias/abrir-chamado", rank = 2)]
pub fn get_new_request_anonymous() -> Flash<Redirect> {
    super::login_required()
}

#[derive(FromForm)]
pub struct RequestForm<'r> {
    title: &'r str,
    category: &'r str,
    description: &'r str,
    address: &'r str,
    lat: Option<f64>,
    lng: Option<f64>,
    image_urls: Option<&'r str>,
}

#[post("/categories/gestao_de_melhorias/abrir-chamado", data = "<form>")]
pub fn post_new_request(
    db: Connections,
    account: Account,
    form: Form<RequestForm<'_>>,
) -> Flash<Redirect> {
    let form = form.into_inner();
    let new_request = usecases::NewRequest {
        title: form.title.to_string(),
        description: form.description.to_string(),
        category: form.category.to_string(),
        address: form.address.to_string(),
        lat: form.lat,
        lng: form.lng,
        image_urls: super::split_image_urls(form.image_urls),
    };
    match flows::submit_request(&db, account.user(), new_request) {
        Ok(_) => Flash::success(
            Redirect::to(uri!(get_hub)),
            "Melhoria registrada com sucesso!",
        ),
        Err(err) => {
            warn!("Unable to submit an improvement request: {err}");
            Flash::error(
                Redirect::to(uri!(get_new_request)),
                "Erro ao salvar o chamado. Tente novamente.",
            )
        }
    }
}

#[post("/categories/gestao_de_melhorias/abrir-chamado", rank = 2)]
pub fn post_new_request_anonymous() -> Flash<Redirect> {
    super::login_required()
}

#[allow(clippy::result_large_err)]
#[get("/categories/gestao_de_melhorias/hub")]
pub fn get_hub(
    db: Connections,
    account: Option<Account>,
    flash: Option<FlashMessage>,
) -> std::result::Result<Markup, Flash<Redirect>> {
    let items = db
        .shared()
        .and_then(|db| Ok(usecases::load_hub(&db, ItemKind::Request)?))
        .map_err(|err| {
            error!("Unable to load the improvement requests: {err}");
            Flash::error(
                Redirect::to(uri!(super::get_index)),
                "Erro interno. Tente novamente mais tarde.",
            )
        })?;
    Ok(view::requests_hub(
        account.as_ref().map(Account::user),
        &items,
        flash,
    ))
}

#[allow(clippy::result_large_err)]
#[get("/categories/gestao_de_melhorias/detalhes/<id>")]
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
        // Ids of other sections must not resolve here.
        Ok(page_data) if page_data.item.kind() == ItemKind::Request => Ok(view::request_detail(
            account.as_ref().map(Account::user),
            &page_data,
            flash,
        )),
        Ok(_) | Err(usecases::Error::Repo(repositories::Error::NotFound)) => {
            Err(Flash::error(hub(), "Chamado não encontrado."))
        }
        Err(err) => {
            error!("Unable to load item '{id}': {err}");
            Err(Flash::error(hub(), "Erro interno ao carregar detalhes."))
        }
    }
}

#[allow(clippy::result_large_err)]
#[post("/categories/gestao_de_melhorias/like/<id>")]
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
        )))) => Err(Flash::error(hub(), "Chamado não encontrado.")),
        Err(err) => {
            error!("Unable to toggle a like on item '{id}': {err}");
            Err(Flash::error(
                hub(),
                "Erro interno. Tente novamente mais tarde.",
            ))
        }
    }
}

#[post("/categories/gestao_de_melhorias/like/<_id>", rank = 2)]
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
#[post("/categories/gestao_de_melhorias/comentar/<id>", data = "<form>")]
pub fn post_comment(
    db: Connections,
    account: Account,
    id: &str,
    form: Form<CommentForm<'_>>,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let new_comment = usecases::NewComment {
        item_id: Id::from(id),
        text: form.text.to_string(),
    };
    match flows::add_comment(&db, account.user(), new_comment) {
        Ok(_) => Ok(Redirect::to(uri!(get_detail(id)))),
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
            "Chamado não encontrado.",
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

#[post("/categories/gestao_de_melhorias/comentar/<_id>", rank = 2)]
pub fn post_comment_anonymous(_id: &str) -> Flash<Redirect> {
    Flash::error(
        Redirect::to(uri!(super::login::get_login)),
        "Você precisa estar logado para comentar.",
    )
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::web::{
        self,
        guards::COOKIE_USER_KEY,
        tests::{prelude::*, register_user},
    };
    use vozativa_core::{
        entities::{ItemStatus, User},
        repositories::{CommentRepo as _, ItemRepo as _},
    };

    fn setup() -> (Client, Connections) {
        web::tests::rocket_test_setup(vec![("/", super::super::routes())])
    }

    fn submit_request(pool: &Connections, author: &User, title: &str) -> Id {
        let item = flows::submit_request(
            pool,
            author,
            usecases::NewRequest {
                title: title.into(),
                description: "O poste da esquina está apagado há uma semana.".into(),
                category: "Iluminação Pública".into(),
                address: "Rua das Flores, 123".into(),
                lat: None,
                lng: None,
                image_urls: vec![],
            },
        )
        .unwrap();
        item.id
    }

    #[test]
    fn get_hub_lists_requests_newest_first() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        submit_request(&pool, &author, "Poste apagado");
        submit_request(&pool, &author, "Buraco na rua");
        let res = client.get("/categories/gestao_de_melhorias/hub").dispatch();
        assert_eq!(res.status(), HttpStatus::Ok);
        let body_str = res.into_string().unwrap();
        assert!(body_str.contains("Poste apagado"));
        assert!(body_str.contains("Buraco na rua"));
        assert!(
            body_str.find("Buraco na rua").unwrap() < body_str.find("Poste apagado").unwrap()
        );
    }

    #[test]
    fn open_request_form_requires_login() {
        let (client, _) = setup();
        let res = client
            .get("/categories/gestao_de_melhorias/abrir-chamado")
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(res.headers().get_one("Location"), Some("/users/login"));
    }

    #[test]
    fn post_new_request_persists_the_item() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let res = client
            .post("/categories/gestao_de_melhorias/abrir-chamado")
            .private_cookie(Cookie::new(COOKIE_USER_KEY, author.id.to_string()))
            .header(ContentType::Form)
            .body(
                "title=Poste+apagado&category=Ilumina%C3%A7%C3%A3o+P%C3%BAblica\
                 &description=Sem+luz+na+esquina.&address=Rua+das+Flores,+123\
                 &image_urls=https%3A%2F%2Fexample.com%2Fp.jpg",
            )
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(
            res.headers().get_one("Location"),
            Some("/categories/gestao_de_melhorias/hub")
        );
        let db = pool.shared().unwrap();
        let items = db.all_items(ItemKind::Request).unwrap();
        assert_eq!(1, items.len());
        assert_eq!("Poste apagado", items[0].title);
        assert_eq!(ItemStatus::Open, items[0].status);
        assert_eq!(author.id, items[0].author);
        assert_eq!(
            vec!["https://example.com/p.jpg".to_string()],
            items[0].images
        );
    }

    #[test]
    fn reject_request_without_a_title() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let res = client
            .post("/categories/gestao_de_melhorias/abrir-chamado")
            .private_cookie(Cookie::new(COOKIE_USER_KEY, author.id.to_string()))
            .header(ContentType::Form)
            .body("title=+&category=Outros&description=Sem+luz.&address=Rua+A")
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(
            res.headers().get_one("Location"),
            Some("/categories/gestao_de_melhorias/abrir-chamado")
        );
        let db = pool.shared().unwrap();
        assert_eq!(0, db.count_items(ItemKind::Request).unwrap());
    }

    #[test]
    fn toggle_like_twice_restores_the_liking_set() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let liker = register_user(&pool, "joao@example.com", "segredo");
        let item_id = submit_request(&pool, &author, "Poste apagado");

        let like = || {
            client
                .post(format!("/categories/gestao_de_melhorias/like/{item_id}"))
                .private_cookie(Cookie::new(COOKIE_USER_KEY, liker.id.to_string()))
                .dispatch()
        };
        let res = like();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        {
            let db = pool.shared().unwrap();
            let item = db.get_item(item_id.as_str()).unwrap();
            assert!(item.likes.contains(&liker.id));
            assert_eq!(1, item.likes.count());
        }
        like();
        let db = pool.shared().unwrap();
        assert!(db.get_item(item_id.as_str()).unwrap().likes.is_empty());
    }

    #[test]
    fn like_requires_login() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let item_id = submit_request(&pool, &author, "Poste apagado");
        let res = client
            .post(format!("/categories/gestao_de_melhorias/like/{item_id}"))
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(res.headers().get_one("Location"), Some("/users/login"));
        let db = pool.shared().unwrap();
        assert!(db.get_item(item_id.as_str()).unwrap().likes.is_empty());
    }

    #[test]
    fn like_redirects_back_to_the_submitting_page() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let item_id = submit_request(&pool, &author, "Poste apagado");
        let res = client
            .post(format!("/categories/gestao_de_melhorias/like/{item_id}"))
            .private_cookie(Cookie::new(COOKIE_USER_KEY, author.id.to_string()))
            .header(Header::new(
                "Referer",
                format!("/categories/gestao_de_melhorias/detalhes/{item_id}"),
            ))
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(
            res.headers().get_one("Location").unwrap(),
            format!("/categories/gestao_de_melhorias/detalhes/{item_id}")
        );
    }

    #[test]
    fn post_comment_appends_to_the_item() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let item_id = submit_request(&pool, &author, "Poste apagado");
        let res = client
            .post(format!("/categories/gestao_de_melhorias/comentar/{item_id}"))
            .private_cookie(Cookie::new(COOKIE_USER_KEY, author.id.to_string()))
            .header(ContentType::Form)
            .body("text=Apoiado,+l%C3%A1+est%C3%A1+escuro+mesmo.")
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(
            res.headers().get_one("Location").unwrap(),
            format!("/categories/gestao_de_melhorias/detalhes/{item_id}")
        );
        let db = pool.shared().unwrap();
        let comments = db.comments_of_item(item_id.as_str()).unwrap();
        assert_eq!(1, comments.len());
        assert_eq!("Apoiado, lá está escuro mesmo.", comments[0].text);
    }

    #[test]
    fn comment_requires_login() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let item_id = submit_request(&pool, &author, "Poste apagado");
        let res = client
            .post(format!("/categories/gestao_de_melhorias/comentar/{item_id}"))
            .header(ContentType::Form)
            .body("text=an%C3%B4nimo")
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(res.headers().get_one("Location"), Some("/users/login"));
        let db = pool.shared().unwrap();
        assert_eq!(0, db.count_comments_of_item(item_id.as_str()).unwrap());
    }

    #[test]
    fn get_detail_shows_item_and_comments() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let item_id = submit_request(&pool, &author, "Poste apagado");
        flows::add_comment(
            &pool,
            &author,
            usecases::NewComment {
                item_id: item_id.clone(),
                text: "Apoiado.".into(),
            },
        )
        .unwrap();
        let res = client
            .get(format!("/categories/gestao_de_melhorias/detalhes/{item_id}"))
            .dispatch();
        assert_eq!(res.status(), HttpStatus::Ok);
        let body_str = res.into_string().unwrap();
        assert!(body_str.contains("Poste apagado"));
        assert!(body_str.contains(&author.name));
        assert!(body_str.contains("Apoiado."));
    }

    #[test]
    fn get_detail_of_an_unknown_item() {
        let (client, _) = setup();
        let res = client
            .get("/categories/gestao_de_melhorias/detalhes/desconhecido")
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(
            res.headers().get_one("Location"),
            Some("/categories/gestao_de_melhorias/hub")
        );
    }
}
