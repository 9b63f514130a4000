use super::prelude::*;
use crate::util::validate;

#[derive(Debug, Clone)]
pub struct NewRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub occurrence: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_urls: Vec<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub category: String,
    pub custom_category: Option<String>,
    pub products: Option<String>,
    pub services: Option<String>,
    pub contact: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub image_urls: Vec<String>,
}

pub fn submit_request<R: ItemRepo>(
    repo: &R,
    author: &User,
    new_request: NewRequest,
) -> Result<ContentItem> {
    let NewRequest {
        title,
        description,
        category,
        address,
        lat,
        lng,
        image_urls,
    } = new_request;
    let category = validate::non_blank(&category).ok_or(Error::Category)?.to_string();
    let details = ItemDetails::Request { category };
    let item = new_item(
        author,
        &title,
        &description,
        &address,
        position(lat, lng)?,
        image_urls,
        details,
    )?;
    repo.create_item(&item)?;
    Ok(item)
}

pub fn submit_report<R: ItemRepo>(
    repo: &R,
    author: &User,
    new_report: NewReport,
) -> Result<ContentItem> {
    let NewReport {
        title,
        description,
        occurrence,
        address,
        lat,
        lng,
        image_urls,
        video_url,
    } = new_report;
    let occurrence = validate::non_blank(&occurrence)
        .ok_or(Error::Occurrence)?
        .to_string();
    let details = ItemDetails::Report {
        occurrence,
        video_url: video_url.as_deref().and_then(validate::non_blank).map(Into::into),
    };
    let item = new_item(
        author,
        &title,
        &description,
        &address,
        position(lat, lng)?,
        image_urls,
        details,
    )?;
    repo.create_item(&item)?;
    Ok(item)
}

pub fn publish_listing<R: ItemRepo>(
    repo: &R,
    author: &User,
    new_listing: NewListing,
) -> Result<ContentItem> {
    let NewListing {
        title,
        description,
        category,
        custom_category,
        products,
        services,
        contact,
        address,
        lat,
        lng,
        image_urls,
    } = new_listing;
    let category = validate::non_blank(&category).ok_or(Error::Category)?.to_string();
    let contact = validate::non_blank(&contact).ok_or(Error::Contact)?.to_string();
    let details = ItemDetails::Listing {
        category,
        custom_category: custom_category
            .as_deref()
            .and_then(validate::non_blank)
            .map(Into::into),
        products: products.as_deref().and_then(validate::non_blank).map(Into::into),
        services: services.as_deref().and_then(validate::non_blank).map(Into::into),
        contact,
    };
    let item = new_item(
        author,
        &title,
        &description,
        &address,
        position(lat, lng)?,
        image_urls,
        details,
    )?;
    repo.create_item(&item)?;
    Ok(item)
}

/// Both coordinates must be given together.
fn position(lat: Option<f64>, lng: Option<f64>) -> Result<Option<MapPoint>> {
    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => MapPoint::try_from_lat_lng_deg(lat, lng)
            .ok_or(Error::Position)
            .map(Some),
        _ => Err(Error::Position),
    }
}

fn new_item(
    author: &User,
    title: &str,
    description: &str,
    address: &str,
    location: Option<MapPoint>,
    image_urls: Vec<String>,
    details: ItemDetails,
) -> Result<ContentItem> {
    let title = validate::non_blank(title).ok_or(Error::Title)?;
    let description = validate::non_blank(description).ok_or(Error::Description)?;
    let images = image_urls
        .into_iter()
        .filter_map(|url| validate::non_blank(&url).map(Into::into))
        .collect();
    Ok(ContentItem {
        id: Id::new(),
        author: author.id.clone(),
        title: title.to_string(),
        description: description.to_string(),
        address: address.trim().to_string(),
        location,
        images,
        status: ItemStatus::initial_for(details.kind()),
        created_at: Timestamp::now(),
        likes: LikeSet::new(),
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::MockDb, *};
    use vozativa_entities::builders::*;

    fn request_form() -> NewRequest {
        NewRequest {
            title: "Poste apagado".into(),
            description: "O poste da esquina está apagado há uma semana.".into(),
            category: "Iluminação Pública".into(),
            address: "Rua das Flores, 123".into(),
            lat: None,
            lng: None,
            image_urls: vec![],
        }
    }

    #[test]
    fn submit_request_starts_open() {
        let db = MockDb::default();
        let author = User::build().finish();
        let item = submit_request(&db, &author, request_form()).unwrap();
        assert_eq!(ItemKind::Request, item.kind());
        assert_eq!(ItemStatus::Open, item.status);
        assert_eq!(author.id, item.author);
        assert!(item.likes.is_empty());
        assert_eq!(item, db.get_item(item.id.as_str()).unwrap());
    }

    #[test]
    fn submit_report_starts_under_review() {
        let db = MockDb::default();
        let author = User::build().finish();
        let item = submit_report(
            &db,
            &author,
            NewReport {
                title: "Descarte irregular".into(),
                description: "Entulho descartado no terreno baldio.".into(),
                occurrence: "Descarte de lixo".into(),
                address: String::new(),
                lat: None,
                lng: None,
                image_urls: vec![],
                video_url: Some("  ".into()),
            },
        )
        .unwrap();
        assert_eq!(ItemStatus::UnderReview, item.status);
        assert!(matches!(
            item.details,
            ItemDetails::Report { video_url: None, .. }
        ));
    }

    #[test]
    fn publish_listing_starts_active() {
        let db = MockDb::default();
        let author = User::build().finish();
        let item = publish_listing(
            &db,
            &author,
            NewListing {
                title: "Marcenaria do Zé".into(),
                description: "Móveis sob medida.".into(),
                category: "Marcenaria".into(),
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
        assert_eq!(ItemStatus::Active, item.status);
    }

    #[test]
    fn reject_listing_without_contact() {
        let db = MockDb::default();
        let author = User::build().finish();
        let result = publish_listing(
            &db,
            &author,
            NewListing {
                title: "Marcenaria do Zé".into(),
                description: "Móveis sob medida.".into(),
                category: "Marcenaria".into(),
                custom_category: None,
                products: None,
                services: None,
                contact: "  ".into(),
                address: String::new(),
                lat: None,
                lng: None,
                image_urls: vec![],
            },
        );
        assert!(matches!(result, Err(Error::Contact)));
        assert_eq!(0, db.count_items(ItemKind::Listing).unwrap());
    }

    #[test]
    fn reject_blank_title() {
        let db = MockDb::default();
        let author = User::build().finish();
        let mut form = request_form();
        form.title = " ".into();
        assert!(matches!(
            submit_request(&db, &author, form),
            Err(Error::Title)
        ));
    }

    #[test]
    fn reject_half_position() {
        let db = MockDb::default();
        let author = User::build().finish();
        let mut form = request_form();
        form.lat = Some(-23.5505);
        assert!(matches!(
            submit_request(&db, &author, form),
            Err(Error::Position)
        ));
    }

    #[test]
    fn accept_full_position() {
        let db = MockDb::default();
        let author = User::build().finish();
        let mut form = request_form();
        form.lat = Some(-23.5505);
        form.lng = Some(-46.6333);
        let item = submit_request(&db, &author, form).unwrap();
        assert!(item.location.is_some());
    }

    #[test]
    fn drop_blank_image_urls() {
        let db = MockDb::default();
        let author = User::build().finish();
        let mut form = request_form();
        form.image_urls = vec!["  ".into(), "https://example.com/p.jpg".into()];
        let item = submit_request(&db, &author, form).unwrap();
        assert_eq!(vec!["https://example.com/p.jpg".to_string()], item.images);
    }
}
