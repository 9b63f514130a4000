use maud::{html, Markup};
use rocket::request::FlashMessage;

use vozativa_core::usecases::ItemPage;

use super::*;

const REQUEST_CATEGORIES: &[&str] = &[
    "Iluminação Pública",
    "Pavimentação",
    "Limpeza Urbana",
    "Saneamento",
    "Trânsito",
    "Outros",
];

const REPORT_OCCURRENCES: &[&str] = &[
    "Descarte irregular de lixo",
    "Obra sem autorização",
    "Poluição sonora",
    "Maus-tratos a animais",
    "Outro",
];

const LISTING_CATEGORIES: &[&str] = &[
    "Alimentação",
    "Construção e Reforma",
    "Serviços Domésticos",
    "Beleza e Estética",
    "Transporte",
    "Outros",
];

pub fn requests_hub(
    user: Option<&User>,
    items: &[ContentItem],
    flash: Option<FlashMessage>,
) -> Markup {
    hub(
        user,
        flash,
        "Gestão de Melhorias",
        "/categories/gestao_de_melhorias/abrir-chamado",
        "Abrir chamado",
        "Nenhum chamado registrado até agora.",
        items,
    )
}

pub fn reports_hub(
    user: Option<&User>,
    items: &[ContentItem],
    flash: Option<FlashMessage>,
) -> Markup {
    hub(
        user,
        flash,
        "Denúncias Sigilosas",
        "/categories/denuncias_sigilosas/abrir-denuncia",
        "Abrir denúncia",
        "Nenhuma denúncia registrada até agora.",
        items,
    )
}

pub fn listings_hub(
    user: Option<&User>,
    items: &[ContentItem],
    flash: Option<FlashMessage>,
) -> Markup {
    hub(
        user,
        flash,
        "Vitrine do Trabalhador",
        "/categories/vitrine_do_trabalhador/criar-vitrine",
        "Criar vitrine",
        "Nenhum anúncio publicado até agora.",
        items,
    )
}

fn hub(
    user: Option<&User>,
    flash: Option<FlashMessage>,
    title: &str,
    new_href: &str,
    new_label: &str,
    empty_text: &str,
    items: &[ContentItem],
) -> Markup {
    page(
        title,
        user,
        flash,
        html! {
            div class="hub-head" {
                h2 { (title) }
                a class="btn" href=(new_href) { (new_label) }
            }
            @if items.is_empty() {
                p class="empty" { (empty_text) }
            } @else {
                div class="cards" {
                    @for item in items {
                        (item_card(item))
                    }
                }
            }
        },
    )
}

pub fn request_detail(
    viewer: Option<&User>,
    page_data: &ItemPage,
    flash: Option<FlashMessage>,
) -> Markup {
    let item = &page_data.item;
    let category = match &item.details {
        ItemDetails::Request { category } => category.as_str(),
        _ => "",
    };
    page(
        &item.title,
        viewer,
        flash,
        html! {
            article class="detail" {
                h2 { (item.title) }
                p class="meta" {
                    span class="status" { (status_label(item.status)) }
                    " · " (category)
                    " · " (item.created_at)
                    " · por "
                    a href=(profile_href(&page_data.author)) { (page_data.author.name) }
                }
                (item_body(item))
                (like_button(viewer, item))
            }
            (comment_section(viewer, item, &page_data.comments))
        },
    )
}

/// Detail page of a confidential report. The author is resolved for
/// the page model like everywhere else but is deliberately not
/// rendered.
pub fn report_detail(
    viewer: Option<&User>,
    page_data: &ItemPage,
    flash: Option<FlashMessage>,
) -> Markup {
    let item = &page_data.item;
    let occurrence = match &item.details {
        ItemDetails::Report { occurrence, .. } => occurrence.as_str(),
        _ => "",
    };
    let video_url = match &item.details {
        ItemDetails::Report { video_url, .. } => video_url.as_deref(),
        _ => None,
    };
    page(
        &item.title,
        viewer,
        flash,
        html! {
            article class="detail" {
                h2 { (item.title) }
                p class="meta" {
                    span class="status" { (status_label(item.status)) }
                    " · " (occurrence)
                    " · " (item.created_at)
                }
                (item_body(item))
                @if let Some(video_url) = video_url {
                    p { a href=(video_url) { "Ver vídeo anexado" } }
                }
                (like_button(viewer, item))
            }
            (comment_section(viewer, item, &page_data.comments))
        },
    )
}

pub fn listing_detail(
    viewer: Option<&User>,
    page_data: &ItemPage,
    flash: Option<FlashMessage>,
) -> Markup {
    let item = &page_data.item;
    let (category, products, services, contact) = match &item.details {
        ItemDetails::Listing {
            category,
            custom_category,
            products,
            services,
            contact,
        } => (
            custom_category.as_deref().unwrap_or(category.as_str()),
            products.as_deref(),
            services.as_deref(),
            contact.as_str(),
        ),
        _ => ("", None, None, ""),
    };
    page(
        &item.title,
        viewer,
        flash,
        html! {
            article class="detail" {
                h2 { (item.title) }
                p class="meta" {
                    span class="status" { (status_label(item.status)) }
                    " · " (category)
                    " · " (item.created_at)
                    " · por "
                    a href=(profile_href(&page_data.author)) { (page_data.author.name) }
                }
                (item_body(item))
                @if let Some(products) = products {
                    h3 { "Produtos" }
                    p { (products) }
                }
                @if let Some(services) = services {
                    h3 { "Serviços" }
                    p { (services) }
                }
                h3 { "Contato" }
                p { (contact) }
                (like_button(viewer, item))
            }
            (comment_section(viewer, item, &page_data.comments))
        },
    )
}

fn profile_href(author: &User) -> String {
    format!("/users/perfil/{}", author.id)
}

fn item_body(item: &ContentItem) -> Markup {
    html! {
        @if !item.images.is_empty() {
            div class="gallery" {
                @for url in &item.images {
                    img src=(url) alt=(item.title);
                }
            }
        }
        p { (item.description) }
        @if !item.address.is_empty() {
            p class="meta" { "Local: " (item.address) }
        }
        @if let Some(location) = &item.location {
            p class="meta" { "Coordenadas: " (location.lat_deg()) ", " (location.lng_deg()) }
        }
    }
}

pub fn request_form(user: &User, flash: Option<FlashMessage>) -> Markup {
    page(
        "Abrir chamado",
        Some(user),
        flash,
        html! {
            h2 { "Abrir chamado" }
            form class="item-form" action="/categories/gestao_de_melhorias/abrir-chamado" method="POST" {
                fieldset {
                    label {
                        "Título"
                        input type="text" name="title" required;
                    }
                    label {
                        "Categoria"
                        select name="category" required {
                            @for category in REQUEST_CATEGORIES {
                                option value=(category) { (category) }
                            }
                        }
                    }
                    label {
                        "Descrição"
                        textarea name="description" rows="5" required {}
                    }
                    label {
                        "Endereço"
                        input type="text" name="address" placeholder="Rua, número, bairro" required;
                    }
                    (coordinate_fields())
                    (image_urls_field())
                    input type="submit" value="Registrar chamado";
                }
            }
        },
    )
}

pub fn report_form(user: &User, flash: Option<FlashMessage>) -> Markup {
    page(
        "Abrir denúncia",
        Some(user),
        flash,
        html! {
            h2 { "Abrir denúncia" }
            p { "A sua identidade não é exibida junto à denúncia." }
            form class="item-form" action="/categories/denuncias_sigilosas/abrir-denuncia" method="POST" {
                fieldset {
                    label {
                        "Tipo de ocorrência"
                        select name="occurrence" required {
                            @for occurrence in REPORT_OCCURRENCES {
                                option value=(occurrence) { (occurrence) }
                            }
                        }
                    }
                    label {
                        "Título (apenas para o tipo \"Outro\")"
                        input type="text" name="title";
                    }
                    label {
                        "Descrição"
                        textarea name="description" rows="5" required {}
                    }
                    label {
                        "Localização"
                        input type="text" name="address" placeholder="Rua, número, bairro" required;
                    }
                    label {
                        "Link de vídeo (opcional)"
                        input type="url" name="video_url";
                    }
                    (coordinate_fields())
                    (image_urls_field())
                    input type="submit" value="Enviar denúncia";
                }
            }
        },
    )
}

pub fn listing_form(user: &User, flash: Option<FlashMessage>) -> Markup {
    page(
        "Criar vitrine",
        Some(user),
        flash,
        html! {
            h2 { "Criar vitrine" }
            form class="item-form" action="/categories/vitrine_do_trabalhador/criar-vitrine" method="POST" {
                fieldset {
                    label {
                        "Título do anúncio"
                        input type="text" name="title" required;
                    }
                    label {
                        "Categoria"
                        select name="category" required {
                            @for category in LISTING_CATEGORIES {
                                option value=(category) { (category) }
                            }
                        }
                    }
                    label {
                        "Qual categoria? (apenas para \"Outros\")"
                        input type="text" name="custom_category";
                    }
                    label {
                        "Descrição"
                        textarea name="description" rows="5" required {}
                    }
                    label {
                        "Produtos (opcional)"
                        input type="text" name="products";
                    }
                    label {
                        "Serviços (opcional)"
                        input type="text" name="services";
                    }
                    label {
                        "Contato"
                        input type="text" name="contact" placeholder="Telefone ou WhatsApp" required;
                    }
                    label {
                        "Endereço"
                        input type="text" name="address" required;
                    }
                    (coordinate_fields())
                    (image_urls_field())
                    input type="submit" value="Publicar anúncio";
                }
            }
        },
    )
}

fn coordinate_fields() -> Markup {
    html! {
        div class="coords" {
            label {
                "Latitude (opcional)"
                input type="number" name="lat" step="any";
            }
            label {
                "Longitude (opcional)"
                input type="number" name="lng" step="any";
            }
        }
    }
}

fn image_urls_field() -> Markup {
    html! {
        label {
            "Fotos (URLs, uma por linha)"
            textarea name="image_urls" rows="3" {}
        }
    }
}
