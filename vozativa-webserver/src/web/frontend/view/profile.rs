use maud::{html, Markup};
use rocket::request::FlashMessage;

use vozativa_core::usecases::PublicProfile;

use super::*;

pub fn profile(user: &User, flash: Option<FlashMessage>) -> Markup {
    page(
        "Meu perfil",
        Some(user),
        flash,
        html! {
            h2 { "Meu perfil" }
            (profile_head(user))
            p class="meta" { (user.email) " · membro desde " (user.created_at) }
            section {
                h3 { "Editar perfil" }
                form class="profile-form" action="/users/profile/edit" method="POST" {
                    fieldset {
                        label {
                            "Nome"
                            input type="text" name="name" value=(user.name) required;
                        }
                        label {
                            "Profissão"
                            input type="text" name="profession" value=(user.profession);
                        }
                        label {
                            "Sobre você"
                            textarea name="bio" rows="4" {
                                @if let Some(bio) = &user.bio { (bio) }
                            }
                        }
                        label {
                            "Foto de perfil (URL)"
                            input type="url" name="avatar_url"
                                value=(user.avatar_url.as_deref().unwrap_or(""));
                        }
                        input type="submit" value="Salvar";
                    }
                }
            }
            section {
                h3 { "Alterar senha" }
                form class="profile-form" action="/users/profile/change-password" method="POST" {
                    fieldset {
                        label {
                            "Senha atual"
                            input type="password" name="current_password" required;
                        }
                        label {
                            "Nova senha"
                            input type="password" name="new_password" required;
                        }
                        label {
                            "Confirme a nova senha"
                            input type="password" name="confirm_password" required;
                        }
                        input type="submit" value="Alterar senha";
                    }
                }
            }
        },
    )
}

pub fn public_profile(
    viewer: Option<&User>,
    profile: &PublicProfile,
    flash: Option<FlashMessage>,
) -> Markup {
    page(
        &profile.user.name,
        viewer,
        flash,
        html! {
            (profile_head(&profile.user))
            @if let Some(bio) = &profile.user.bio {
                p { (bio) }
            }
            p class="meta" {
                (profile.items.len()) " publicações · ♥ "
                (profile.likes_received) " curtidas recebidas"
            }
            h3 { "Publicações" }
            @if profile.items.is_empty() {
                p class="empty" { "Este usuário ainda não publicou nada." }
            } @else {
                div class="cards" {
                    @for item in &profile.items {
                        (item_card(item))
                    }
                }
            }
        },
    )
}

fn profile_head(user: &User) -> Markup {
    html! {
        div class="profile-head" {
            @if let Some(avatar_url) = &user.avatar_url {
                img class="avatar" src=(avatar_url) alt=(user.name);
            }
            div {
                h2 { (user.name) }
                p class="meta" { (user.profession) }
            }
        }
    }
}
