use chrono::Utc;
use log::debug;

use crate::api::client::CatalogApi;
use crate::host::HostBridge;
use crate::model::config::Config;
use crate::model::menu::{Folder, MenuItem, PlayableItem};
use crate::model::panel::Profile;
use crate::processing::{content, m3u, playback};
use crate::repository::userdata::Userdata;
use crate::routes::{Route, RouteRequest};
use crate::scheduler;
use crate::sportcast_error::{create_sportcast_error_result, SportcastError, SportcastErrorKind};

#[derive(Debug)]
pub enum RouteResult {
    Folder(Folder),
    Playable(PlayableItem),
    None,
}

/// Everything a handler needs for one dispatch cycle. Constructed fresh per
/// cycle, the API session re-established before the handler runs.
pub struct Context<'a> {
    pub config: &'a Config,
    pub host: &'a dyn HostBridge,
    pub api: CatalogApi,
    pub userdata: Userdata,
}

impl<'a> Context<'a> {
    pub fn new(config: &'a Config, host: &'a dyn HostBridge) -> Self {
        let userdata = Userdata::load(&config.userdata_path());
        let mut api = CatalogApi::new(config);
        api.new_session(&userdata);
        Self { config, host, api, userdata }
    }

    fn save_userdata(&self) -> Result<(), SportcastError> {
        self.userdata.save(&self.config.userdata_path())
    }
}

pub fn dispatch(ctx: &mut Context, request: &RouteRequest) -> Result<RouteResult, SportcastError> {
    debug!("dispatch {}", request.route);
    match request.route {
        Route::Home => home(ctx),
        Route::Login => login(ctx),
        Route::Logout => logout(ctx),
        Route::Shows => landing_folder(ctx, "Shows", "shows"),
        Route::Sports => sports(ctx),
        Route::Sport => sport(ctx, request),
        Route::Show => show(ctx, request),
        Route::Panel => panel(ctx, request),
        Route::Alert => alert(ctx, request),
        Route::Play => play(ctx, request),
        Route::Playlist => playlist(ctx, request),
        Route::SelectProfile => select_profile(ctx),
        Route::Service => service_tick(ctx),
    }
}

fn required<'r>(request: &'r RouteRequest, key: &str) -> Result<&'r str, SportcastError> {
    match request.param(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => create_sportcast_error_result!(SportcastErrorKind::Info, "missing parameter {key}"),
    }
}

fn home(ctx: &mut Context) -> Result<RouteResult, SportcastError> {
    let mut folder = Folder::new("Sportcast");
    folder.cache_to_disc = false;

    if ctx.api.logged_in() {
        folder.add_item(MenuItem::folder(String::from("Shows"), RouteRequest::new(Route::Shows)));
        folder.add_item(MenuItem::folder(String::from("Sports"), RouteRequest::new(Route::Sports)));

        let rows = ctx.api.landing("home", None)?;
        folder.add_items(content::parse_landing(ctx.config, &ctx.userdata, &rows, Utc::now()));

        folder.add_item(MenuItem::action(String::from("Select Profile"), RouteRequest::new(Route::SelectProfile)));
        folder.add_item(MenuItem::action(String::from("Logout"), RouteRequest::new(Route::Logout)));
    } else {
        folder.add_item(MenuItem::action(String::from("Login"), RouteRequest::new(Route::Login)));
    }

    Ok(RouteResult::Folder(folder))
}

fn login(ctx: &mut Context) -> Result<RouteResult, SportcastError> {
    let default_user = ctx.userdata.username.clone().unwrap_or_default();
    let Some(username) = ctx.host.text_input("Username", &default_user).filter(|u| !u.is_empty()) else {
        return Ok(RouteResult::None);
    };
    ctx.userdata.username = Some(username.clone());
    ctx.save_userdata()?;

    let Some(password) = ctx.host.secret_input("Password").filter(|p| !p.is_empty()) else {
        return Ok(RouteResult::None);
    };

    ctx.userdata.refresh_token = ctx.api.login(&username, &password)?;
    ctx.save_userdata()?;
    ctx.host.refresh();
    Ok(RouteResult::None)
}

fn logout(ctx: &mut Context) -> Result<RouteResult, SportcastError> {
    if !ctx.host.confirm("Are you sure you want to logout?", "Yes", "No") {
        return Ok(RouteResult::None);
    }
    ctx.api.logout();
    ctx.userdata.refresh_token = None;
    ctx.userdata.profile = None;
    ctx.save_userdata()?;
    ctx.host.refresh();
    Ok(RouteResult::None)
}

fn landing_folder(ctx: &mut Context, title: &str, name: &str) -> Result<RouteResult, SportcastError> {
    let rows = ctx.api.landing(name, None)?;
    let mut folder = Folder::new(title);
    folder.add_items(content::parse_landing(ctx.config, &ctx.userdata, &rows, Utc::now()));
    Ok(RouteResult::Folder(folder))
}

/// Sport menu entries first, then the sports landing panels.
fn sports(ctx: &mut Context) -> Result<RouteResult, SportcastError> {
    let mut folder = Folder::new("Sports");

    for entry in ctx.api.sport_menu("default")? {
        let mut item = MenuItem::folder(
            entry.name.clone(),
            RouteRequest::new(Route::Sport)
                .with_param("sport", &entry.sport)
                .with_param("name", &entry.name),
        );
        item.art.thumb = Some(ctx.config.sport_logo_url(&entry.sport));
        folder.add_item(item);
    }

    let rows = ctx.api.landing("sports", None)?;
    folder.add_items(content::parse_landing(ctx.config, &ctx.userdata, &rows, Utc::now()));
    Ok(RouteResult::Folder(folder))
}

fn sport(ctx: &mut Context, request: &RouteRequest) -> Result<RouteResult, SportcastError> {
    let sport = required(request, "sport")?;
    let name = request.param("name").unwrap_or(sport);

    let rows = ctx.api.landing("sport", Some(sport))?;
    let mut folder = Folder::new(name);
    folder.add_items(content::parse_landing(ctx.config, &ctx.userdata, &rows, Utc::now()));
    Ok(RouteResult::Folder(folder))
}

fn show(ctx: &mut Context, request: &RouteRequest) -> Result<RouteResult, SportcastError> {
    let id = required(request, "id")?;
    let title = request.param("title").unwrap_or("");
    let rows = ctx.api.show(id)?;

    let mut folder = Folder::new(title);
    for row in &rows {
        if row.title == "Episodes" {
            folder.add_items(content::parse_contents(ctx.config, &ctx.userdata, &row.contents, Utc::now()));
        }
    }
    Ok(RouteResult::Folder(folder))
}

fn panel(ctx: &mut Context, request: &RouteRequest) -> Result<RouteResult, SportcastError> {
    let id = required(request, "id")?;
    let data = ctx.api.panel(id)?;
    let mut folder = Folder::new(&data.title);
    folder.add_items(content::parse_contents(ctx.config, &ctx.userdata, &data.contents, Utc::now()));
    Ok(RouteResult::Folder(folder))
}

fn alert(ctx: &mut Context, request: &RouteRequest) -> Result<RouteResult, SportcastError> {
    let asset = required(request, "asset")?;
    let title = request.param("title").unwrap_or("");
    let image = request.param("image").filter(|i| !i.is_empty());

    let message = if ctx.userdata.toggle_alert(asset) {
        "Reminder set"
    } else {
        "Reminder removed"
    };
    ctx.save_userdata()?;
    ctx.host.notify(title, message, image);
    ctx.host.refresh();
    Ok(RouteResult::None)
}

fn select_profile(ctx: &mut Context) -> Result<RouteResult, SportcastError> {
    let mut profiles = ctx.api.profiles()?;
    profiles.push(Profile { id: None, name: String::from("No Profile") });

    let options: Vec<String> = profiles.iter().map(|p| p.name.clone()).collect();
    let Some(index) = ctx.host.select("Select profile", &options) else {
        return Ok(RouteResult::None);
    };
    let Some(profile) = profiles.get(index) else {
        return Ok(RouteResult::None);
    };

    ctx.userdata.profile = profile.id.clone();
    ctx.save_userdata()?;
    ctx.host.refresh();
    Ok(RouteResult::None)
}

fn play(ctx: &mut Context, request: &RouteRequest) -> Result<RouteResult, SportcastError> {
    if !ctx.api.logged_in() {
        return create_sportcast_error_result!(SportcastErrorKind::Auth, "login required");
    }
    let id = required(request, "id")?;
    let is_live = matches!(request.param("is_live"), Some("true"));
    let start_from = request.param_u64("start_from");
    let play_type = request
        .param("play_type")
        .and_then(|value| value.parse().ok())
        .unwrap_or(ctx.config.live_play_type);

    let item = playback::resolve_play(ctx.config, &ctx.api, ctx.host, id, is_live, start_from, play_type, Utc::now())?;
    Ok(RouteResult::Playable(item))
}

fn playlist(ctx: &mut Context, request: &RouteRequest) -> Result<RouteResult, SportcastError> {
    m3u::write_playlist(ctx.config, &ctx.api, request.param("output"))?;
    Ok(RouteResult::None)
}

fn service_tick(ctx: &mut Context) -> Result<RouteResult, SportcastError> {
    let config = ctx.config;
    let host = ctx.host;
    let api = &ctx.api;
    let userdata = &mut ctx.userdata;

    let play_type = config.live_play_type;
    let path = config.userdata_path();

    scheduler::run_alert_check(
        userdata,
        &path,
        config.alert_grace_secs,
        Utc::now(),
        host,
        |id| api.event(id),
        |asset| {
            playback::resolve_play(config, api, host, &asset.id, asset.is_live, asset.start_from_secs(), play_type, Utc::now())
                .map(|item| host.play(&item))
        },
    )?;
    Ok(RouteResult::None)
}
