use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use gtk::prelude::*;
use log::{error, info};
use tinymarquee_core::text::TextStyle;
use tokio::runtime::Runtime;

use crate::{config::DemoConfig, widgets::marquee_view::MarqueeView};

pub const APP_ID: &str = "io.github.tinymarquee.Demo";

pub fn run(config: DemoConfig) -> Result<()> {
    gtk::init().with_context(|| "failed to init gtk")?;
    let rt = get_new_tokio_rt()?;
    // scroll timers are registered from the gtk thread
    let _guard = rt.enter();

    let application = gtk::Application::builder().application_id(APP_ID).build();
    application.connect_activate(move |app| {
        if let Err(err) = build_window(app, &config) {
            error!("{err:#}");
            app.quit();
        }
    });
    // the command line was already parsed by clap
    let code = application.run_with_args::<&str>(&[]);
    info!("exited with {code:?}");
    Ok(())
}

fn build_window(app: &gtk::Application, config: &DemoConfig) -> Result<()> {
    let view = MarqueeView::new(&config.marquee, TextStyle::default())?;
    view.set_size_request(config.width, config.height);
    view.set_halign(gtk::Align::Center);
    view.set_text_color(config.text_color);
    view.set_text(&config.text);

    let faster_pause = Duration::try_from_secs_f64(config.faster_pause_interval)
        .with_context(|| format!("invalid pause interval {}", config.faster_pause_interval))?;
    let faster_speed = config.faster_speed;
    let faster = gtk::Button::with_label("Faster");
    faster.set_halign(gtk::Align::Center);
    let target = view.downgrade();
    faster.connect_clicked(move |button| {
        let Some(view) = target.upgrade() else {
            return;
        };
        view.set_pause_interval(faster_pause);
        if let Err(err) = view.set_speed(faster_speed) {
            error!("{err:#}");
            return;
        }
        button.set_visible(false);
    });

    let container = gtk::Box::builder()
        .orientation(gtk::Orientation::Vertical)
        .spacing(24)
        .halign(gtk::Align::Center)
        .valign(gtk::Align::Center)
        .build();
    container.append(&view);
    container.append(&faster);

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("tinymarquee")
        .default_width(400)
        .default_height(240)
        .child(&container)
        .build();
    window.present();
    Ok(())
}

/// Current thread runtime driving the timers, parked on its own thread
pub fn get_new_tokio_rt() -> Result<Arc<Runtime>> {
    let (rt_send, rt_recv) = tokio::sync::oneshot::channel::<Arc<Runtime>>();
    std::thread::Builder::new()
        .name("tinymarquee-timers".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(rt) => Arc::new(rt),
                Err(err) => {
                    error!("failed to build the tokio runtime: {err}");
                    return;
                }
            };
            if rt_send.send(rt.clone()).is_err() {
                return;
            }
            rt.block_on(std::future::pending::<()>()); //keep thread alive
        })
        .with_context(|| "failed to spawn the timer thread")?;

    rt_recv
        .blocking_recv()
        .with_context(|| "failed to receive rt")
}
