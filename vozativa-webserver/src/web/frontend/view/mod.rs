use maud::{html, Markup};
use rocket::request::FlashMessage;

use vozativa_core::entities::{Comment, ContentItem, ItemDetails, ItemKind, ItemStatus, User};

mod items;
mod login;
mod page;
mod profile;
mod register;

pub use items::*;
pub use login::*;
use page::*;
pub use profile::*;
pub use register::*;

pub fn index(user: Option<&User>, flash: Option<FlashMessage>) -> Markup {
    page(
        "Voz Ativa",
        user,
        flash,
        html! {
            div class="hero" {
                h1 { "Voz Ativa" }
                p { "O canal direto entre você e a sua cidade." }
                a class="btn" href="/categories" { "Participar" }
            }
            div class="cards" {
                (category_card(
                    "Gestão de Melhorias",
                    "Registre problemas do seu bairro e acompanhe a resposta da prefeitura.",
                    "/categories/gestao_de_melhorias/hub",
                ))
                (category_card(
                    "Denúncias Sigilosas",
                    "Relate ocorrências de forma segura.",
                    "/categories/denuncias_sigilosas/hub",
                ))
                (category_card(
                    "Vitrine do Trabalhador",
                    "Divulgue o seu trabalho e encontre profissionais da cidade.",
                    "/categories/vitrine_do_trabalhador/hub",
                ))
            }
        },
    )
}

pub fn categories(user: Option<&User>, flash: Option<FlashMessage>) -> Markup {
    page(
        "Categorias",
        user,
        flash,
        html! {
            h2 { "Categorias" }
            div class="cards" {
                div class="card" {
                    h3 { "Gestão de Melhorias" }
                    p { "Buraco na rua, poste apagado, entulho acumulado? Abra um chamado." }
                    p {
                        a href="/categories/gestao_de_melhorias/hub" { "Ver chamados" }
                        " · "
                        a href="/categories/gestao_de_melhorias/saiba-mais" { "Saiba mais" }
                    }
                }
                div class="card" {
                    h3 { "Denúncias Sigilosas" }
                    p { "Relate irregularidades com segurança. A sua identidade não é exibida." }
                    p {
                        a href="/categories/denuncias_sigilosas/hub" { "Ver denúncias" }
                        " · "
                        a href="/categories/denuncias_sigilosas/saiba-mais" { "Saiba mais" }
                    }
                }
                div class="card" {
                    h3 { "Vitrine do Trabalhador" }
                    p { "Um espaço gratuito para divulgar produtos e serviços locais." }
                    p {
                        a href="/categories/vitrine_do_trabalhador/hub" { "Ver anúncios" }
                        " · "
                        a href="/categories/vitrine_do_trabalhador/saiba-mais" { "Saiba mais" }
                    }
                }
            }
        },
    )
}

pub fn admin(user: &User) -> Markup {
    page(
        "Administração",
        Some(user),
        None,
        html! {
            h2 { "Administração" }
            p { "Bem-vindo, " (user.name) "." }
            ul {
                li { a href="/admin/painel" { "Painel de denúncias" } }
            }
        },
    )
}

pub fn admin_panel(user: &User, reports: &[ContentItem], flash: Option<FlashMessage>) -> Markup {
    page(
        "Painel de Denúncias",
        Some(user),
        flash,
        html! {
            h2 { "Painel de Denúncias" }
            p class="meta" { (reports.len()) " denúncias registradas" }
            @if reports.is_empty() {
                p class="empty" { "Nenhuma denúncia registrada até agora." }
            } @else {
                div class="cards" {
                    @for item in reports {
                        (item_card(item))
                    }
                }
            }
        },
    )
}

pub fn about_requests(user: Option<&User>) -> Markup {
    about_page(
        user,
        "Gestão de Melhorias",
        html! {
            p { "Encontrou um problema de infraestrutura no seu bairro? \
                 Abra um chamado descrevendo o local e o que precisa ser feito. \
                 Os chamados são públicos e podem ser apoiados com curtidas e \
                 comentários de outros moradores." }
            p {
                a class="btn" href="/categories/gestao_de_melhorias/abrir-chamado" { "Abrir chamado" }
            }
        },
    )
}

pub fn about_reports(user: Option<&User>) -> Markup {
    about_page(
        user,
        "Denúncias Sigilosas",
        html! {
            p { "Denuncie ocorrências como descarte irregular de lixo ou obras \
                 sem autorização. O autor de uma denúncia nunca é exibido nas \
                 páginas públicas." }
            p {
                a class="btn" href="/categories/denuncias_sigilosas/abrir-denuncia" { "Abrir denúncia" }
            }
        },
    )
}

pub fn about_listings(user: Option<&User>) -> Markup {
    about_page(
        user,
        "Vitrine do Trabalhador",
        html! {
            p { "Trabalhadores e pequenos negócios da cidade podem divulgar os \
                 seus produtos e serviços gratuitamente." }
            p {
                a class="btn" href="/categories/vitrine_do_trabalhador/criar-vitrine" { "Criar vitrine" }
            }
        },
    )
}

fn about_page(user: Option<&User>, title: &str, content: Markup) -> Markup {
    page(
        title,
        user,
        None,
        html! {
            h2 { (title) }
            (content)
        },
    )
}

fn category_card(title: &str, text: &str, href: &str) -> Markup {
    html! {
        a class="card" href=(href) {
            h3 { (title) }
            p { (text) }
        }
    }
}

fn verification_widget(site_key: Option<&str>) -> Markup {
    html! {
        @if let Some(site_key) = site_key {
            script src="https://www.google.com/recaptcha/api.js" async defer {}
            div class="g-recaptcha" data-sitekey=(site_key) {}
        }
    }
}

fn status_label(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Open => "Aberto",
        ItemStatus::UnderReview => "Em Análise",
        ItemStatus::Active => "Ativo",
        ItemStatus::Resolved => "Resolvido",
    }
}

fn section_slug(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Request => "gestao_de_melhorias",
        ItemKind::Report => "denuncias_sigilosas",
        ItemKind::Listing => "vitrine_do_trabalhador",
    }
}

fn detail_href(item: &ContentItem) -> String {
    format!(
        "/categories/{}/detalhes/{}",
        section_slug(item.kind()),
        item.id
    )
}

fn like_href(item: &ContentItem) -> String {
    // The listing section kept its Portuguese route name.
    let action = match item.kind() {
        ItemKind::Listing => "curtir",
        _ => "like",
    };
    format!(
        "/categories/{}/{}/{}",
        section_slug(item.kind()),
        action,
        item.id
    )
}

fn comment_href(item: &ContentItem) -> String {
    format!(
        "/categories/{}/comentar/{}",
        section_slug(item.kind()),
        item.id
    )
}

fn item_card(item: &ContentItem) -> Markup {
    html! {
        a class="card" href=(detail_href(item)) {
            h3 { (item.title) }
            p class="meta" {
                span class="status" { (status_label(item.status)) }
                " · " (item.created_at)
                " · ♥ " (item.likes.count())
            }
            p { (teaser(&item.description)) }
        }
    }
}

fn teaser(text: &str) -> String {
    let mut chars = text.chars();
    let short: String = chars.by_ref().take(160).collect();
    if chars.next().is_some() {
        format!("{short}…")
    } else {
        short
    }
}

fn like_button(viewer: Option<&User>, item: &ContentItem) -> Markup {
    let label = match viewer {
        Some(user) if item.likes.contains(&user.id) => "Descurtir",
        _ => "Curtir",
    };
    html! {
        form class="like" action=(like_href(item)) method="POST" {
            button type="submit" { "♥ " (item.likes.count()) " · " (label) }
        }
    }
}

fn comment_section(
    viewer: Option<&User>,
    item: &ContentItem,
    comments: &[(Comment, String)],
) -> Markup {
    html! {
        section class="comments" {
            h3 { "Comentários (" (comments.len()) ")" }
            @if comments.is_empty() {
                p class="empty" { "Ainda não há comentários." }
            }
            ul {
                @for (comment, author_name) in comments {
                    li {
                        p class="meta" { strong { (author_name) } " · " (comment.created_at) }
                        p { (comment.text) }
                    }
                }
            }
            @if viewer.is_some() {
                form class="comment-form" action=(comment_href(item)) method="POST" {
                    textarea name="text" rows="3" placeholder="Escreva um comentário" required {}
                    input type="submit" value="Comentar";
                }
            } @else {
                p { a href="/users/login" { "Entre" } " para comentar." }
            }
        }
    }
}
