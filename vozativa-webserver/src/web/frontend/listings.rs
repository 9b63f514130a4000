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

#[get("/categories/vitrine_do_trabalhador/saiba-mais")]
pub fn get_about(account: Option<Account>) -> Markup {
    view::about_listings(account.as_ref().map(Account::user))
}

#[get("/categories/vitrine_do_trabalhador/criar-vitrine")]
pub fn get_new_listing(account: Account, flash: Option<FlashMessage>) -> Markup {
    view::listing_form(account.user(), flash)
}

#[get("/categories/vitrine_do_trabalhador/criar-vitrine", rank = 2)]
pub fn get_new_listing_anonymous() -> Flash<Redirect> {
    super::login_required()
}

#[derive(FromForm)]
pub struct ListingForm<'r> {
    title: &'r str,
    category: &'r str,
    custom_category: Option<&'r str>,
    description: &'r str,
    products: Option<&'r str>,
    services: Option<&'r str>,
    contact: &'r str,
    address: &'r str,
    lat: Option<f64>,
    lng: Option<f64>,
    image_urls: Option<&'r str>,
}

#[post("/categories/vitrine_do_trabalhador/criar-vitrine", data = "<form>")]
pub fn post_new_listing(
    db: Connections,
    account: Account,
    referer: Referer,
    form: Form<ListingForm<'_>>,
) -> Flash<Redirect> {
    let form = form.into_inner();
    if form.title.is_empty() || form.description.is_empty() {
        let fallback = uri!(get_new_listing).to_string();
        return Flash::error(
            Redirect::to(referer.or(&fallback)),
            "Preencha todos os campos obrigatórios.",
        );
    }
    // A free-text category is only kept for "Outros".
    let custom_category = if form.category == "Outros" {
        form.custom_category.map(ToString::to_string)
    } else {
        None
    };
    let new_listing = usecases::NewListing {
        title: form.title.to_string(),
        description: form.description.to_string(),
        category: form.category.to_string(),
        custom_category,
        products: form.products.map(ToString::to_string),
        services: form.services.map(ToString::to_string),
        contact: form.contact.to_string(),
        address: form.address.to_string(),
        lat: form.lat,
        lng: form.lng,
        image_urls: super::split_image_urls(form.image_urls),
    };
    match flows::publish_listing(&db, account.user(), new_listing) {
        Ok(_) => Flash::success(
            Redirect::to(uri!(get_hub)),
            "Anúncio publicado com sucesso!",
        ),
        Err(err) => {
            warn!("Unable to publish a service listing: {err}");
            Flash::error(
                Redirect::to(uri!(get_hub)),
                "Houve um erro interno ao salvar o anúncio.",
            )
        }
    }
}

#[post("/categories/vitrine_do_trabalhador/criar-vitrine", rank = 2)]
pub fn post_new_listing_anonymous() -> Flash<Redirect> {
    super::login_required()
}

#[allow(clippy::result_large_err)]
#[get("/categories/vitrine_do_trabalhador/hub")]
pub fn get_hub(
    db: Connections,
    account: Option<Account>,
    flash: Option<FlashMessage>,
) -> std::result::Result<Markup, Flash<Redirect>> {
    let items = db
        .shared()
        .and_then(|db| Ok(usecases::load_hub(&db, ItemKind::Listing)?))
        .map_err(|err| {
            error!("Unable to load the service listings: {err}");
            Flash::error(
                Redirect::to(uri!(super::get_categories)),
                "Erro interno. Tente novamente mais tarde.",
            )
        })?;
    Ok(view::listings_hub(
        account.as_ref().map(Account::user),
        &items,
        flash,
    ))
}

#[allow(clippy::result_large_err)]
#[get("/categories/vitrine_do_trabalhador/detalhes/<id>")]
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
        Ok(page_data) if page_data.item.kind() == ItemKind::Listing => Ok(view::listing_detail(
            account.as_ref().map(Account::user),
            &page_data,
            flash,
        )),
        Ok(_) | Err(usecases::Error::Repo(repositories::Error::NotFound)) => {
            Err(Flash::error(hub(), "Este anúncio não foi encontrado."))
        }
        Err(err) => {
            error!("Unable to load item '{id}': {err}");
            Err(Flash::error(hub(), "Erro interno ao carregar detalhes."))
        }
    }
}

#[allow(clippy::result_large_err)]
#[post("/categories/vitrine_do_trabalhador/curtir/<id>")]
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
        )))) => Err(Flash::error(hub(), "Este anúncio não foi encontrado.")),
        Err(err) => {
            error!("Unable to toggle a like on item '{id}': {err}");
            Err(Flash::error(
                hub(),
                "Erro interno. Tente novamente mais tarde.",
            ))
        }
    }
}

#[post("/categories/vitrine_do_trabalhador/curtir/<_id>", rank = 2)]
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
#[post("/categories/vitrine_do_trabalhador/comentar/<id>", data = "<form>")]
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
            "Este anúncio não foi encontrado.",
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

#[post("/categories/vitrine_do_trabalhador/comentar/<_id>", rank = 2)]
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
        entities::{ItemDetails, ItemStatus, User},
        repositories::ItemRepo as _,
    };

    fn setup() -> (Client, Connections) {
        web::tests::rocket_test_setup(vec![("/", super::super::routes())])
    }

    fn publish_listing(pool: &Connections, author: &User, title: &str) -> Id {
        let item = flows::publish_listing(
            pool,
            author,
            usecases::NewListing {
                title: title.into(),
                description: "Móveis sob medida.".into(),
                category: "Construção e Reforma".into(),
                custom_category: None,
                products: Some("Mesas, cadeiras".into()),
                services: None,
                contact: "(11) 99999-0000".into(),
                address: "Rua do Comércio, 45".into(),
                lat: None,
                lng: None,
                image_urls: vec![],
            },
        )
        .unwrap();
        item.id
    }

    #[test]
    fn post_new_listing_persists_the_item() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let res = client
            .post("/categories/vitrine_do_trabalhador/criar-vitrine")
            .private_cookie(Cookie::new(COOKIE_USER_KEY, author.id.to_string()))
            .header(ContentType::Form)
            .body(
                "title=Marcenaria+da+Maria&category=Constru%C3%A7%C3%A3o+e+Reforma\
                 &description=M%C3%B3veis+sob+medida.&products=Mesas\
                 &contact=(88)+99999-0000&address=Rua+do+Com%C3%A9rcio,+45",
            )
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(
            res.headers().get_one("Location"),
            Some("/categories/vitrine_do_trabalhador/hub")
        );
        let db = pool.shared().unwrap();
        let items = db.all_items(ItemKind::Listing).unwrap();
        assert_eq!(1, items.len());
        assert_eq!("Marcenaria da Maria", items[0].title);
        assert_eq!(ItemStatus::Active, items[0].status);
        assert!(matches!(
            &items[0].details,
            ItemDetails::Listing { contact, .. } if contact == "(88) 99999-0000"
        ));
    }

    #[test]
    fn keep_the_custom_category_only_for_outros() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let post = |body: &str| {
            let res = client
                .post("/categories/vitrine_do_trabalhador/criar-vitrine")
                .private_cookie(Cookie::new(COOKIE_USER_KEY, author.id.to_string()))
                .header(ContentType::Form)
                .body(body.to_string())
                .dispatch();
            assert_eq!(res.status(), HttpStatus::SeeOther);
        };
        post(
            "title=Afiador+de+facas&category=Outros&custom_category=Afia%C3%A7%C3%A3o\
             &description=Afio+facas+e+tesouras.&contact=988887777&address=Rua+F",
        );
        post(
            "title=Marmitas+da+Ana&category=Alimenta%C3%A7%C3%A3o&custom_category=ignorada\
             &description=Marmitas+caseiras.&contact=977776666&address=Rua+G",
        );
        let db = pool.shared().unwrap();
        let items = db.all_items(ItemKind::Listing).unwrap();
        assert_eq!(2, items.len());
        // Newest first.
        assert!(matches!(
            &items[0].details,
            ItemDetails::Listing { custom_category: None, .. }
        ));
        assert!(matches!(
            &items[1].details,
            ItemDetails::Listing { custom_category: Some(c), .. } if c == "Afiação"
        ));
    }

    #[test]
    fn reject_listing_without_required_fields() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let res = client
            .post("/categories/vitrine_do_trabalhador/criar-vitrine")
            .private_cookie(Cookie::new(COOKIE_USER_KEY, author.id.to_string()))
            .header(ContentType::Form)
            .body("title=&category=Outros&description=&contact=1&address=Rua")
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        // Without a referer the form page is the fallback.
        assert_eq!(
            res.headers().get_one("Location"),
            Some("/categories/vitrine_do_trabalhador/criar-vitrine")
        );
        let db = pool.shared().unwrap();
        assert_eq!(0, db.count_items(ItemKind::Listing).unwrap());
    }

    #[test]
    fn reject_listing_without_contact() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let res = client
            .post("/categories/vitrine_do_trabalhador/criar-vitrine")
            .private_cookie(Cookie::new(COOKIE_USER_KEY, author.id.to_string()))
            .header(ContentType::Form)
            .body(
                "title=Marcenaria&category=Outros&description=M%C3%B3veis.\
                 &contact=+&address=Rua",
            )
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(
            res.headers().get_one("Location"),
            Some("/categories/vitrine_do_trabalhador/hub")
        );
        let db = pool.shared().unwrap();
        assert_eq!(0, db.count_items(ItemKind::Listing).unwrap());
    }

    #[test]
    fn curtir_toggles_the_like() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let liker = register_user(&pool, "joao@example.com", "segredo");
        let item_id = publish_listing(&pool, &author, "Marcenaria da Maria");
        let res = client
            .post(format!(
                "/categories/vitrine_do_trabalhador/curtir/{item_id}"
            ))
            .private_cookie(Cookie::new(COOKIE_USER_KEY, liker.id.to_string()))
            .dispatch();
        assert_eq!(res.status(), HttpStatus::SeeOther);
        assert_eq!(
            res.headers().get_one("Location"),
            Some("/categories/vitrine_do_trabalhador/hub")
        );
        let db = pool.shared().unwrap();
        assert!(db
            .get_item(item_id.as_str())
            .unwrap()
            .likes
            .contains(&liker.id));
    }

    #[test]
    fn get_detail_shows_contact_and_products() {
        let (client, pool) = setup();
        let author = register_user(&pool, "maria@example.com", "segredo");
        let item_id = publish_listing(&pool, &author, "Marcenaria da Maria");
        let res = client
            .get(format!(
                "/categories/vitrine_do_trabalhador/detalhes/{item_id}"
            ))
            .dispatch();
        assert_eq!(res.status(), HttpStatus::Ok);
        let body_str = res.into_string().unwrap();
        assert!(body_str.contains("Marcenaria da Maria"));
        assert!(body_str.contains("(11) 99999-0000"));
        assert!(body_str.contains("Mesas, cadeiras"));
        assert!(body_str.contains(&author.name));
    }
}
