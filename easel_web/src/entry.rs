// Copyright 2026 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use easel_image_cache::ImageCache;
use easel_imaging_web_canvas::{HtmlImageLoader, WebCanvasSurface};
use easel_port::{InputForwarder, PortBridge, StickVector, report};
use js_sys::{Function, JSON, Reflect};
use kurbo::Point;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{TouchEvent, Window};

use crate::{WebConfig, logger};

type Bridge = PortBridge<WebCanvasSurface, HtmlImageLoader>;

fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Wire Easel to an application's ports.
///
/// `ports` is an object of named ports; `config` is an optional settings
/// object (see [`WebConfig`]). Fails if the config is invalid, the canvas is
/// missing, or either port lacks its method.
#[wasm_bindgen]
pub fn attach(ports: &JsValue, config: JsValue) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = read_config(&config)?;
    logger::init(config.log_level().map_err(js_error)?);

    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;
    let surface = WebCanvasSurface::from_selector(&document, &config.canvas_selector)?;
    let options = config.bridge_options().map_err(js_error)?;
    let bridge = Rc::new(PortBridge::new(
        surface,
        ImageCache::new(HtmlImageLoader::new()).with_spawner(spawn_local),
        options,
    ));

    subscribe_renders(ports, &config.outgoing_port, bridge)?;
    forward_touches(&window, ports, &config.incoming_port)?;

    log::info!(
        "attached to {} via ports {:?}/{:?}",
        config.canvas_selector,
        config.outgoing_port,
        config.incoming_port
    );
    Ok(())
}

fn read_config(config: &JsValue) -> Result<WebConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(WebConfig::default());
    }
    let text = String::from(JSON::stringify(config)?);
    WebConfig::from_json(&text).map_err(js_error)
}

/// Look up `ports[port][method]`, returning the port object and the method.
fn port_method(ports: &JsValue, port: &str, method: &str) -> Result<(JsValue, Function), JsValue> {
    let target = Reflect::get(ports, &JsValue::from_str(port))?;
    if target.is_undefined() || target.is_null() {
        return Err(js_error(format_args!("no port named {port:?}")));
    }
    let function = Reflect::get(&target, &JsValue::from_str(method))?
        .dyn_into::<Function>()
        .map_err(|_| js_error(format_args!("port {port:?} has no {method} function")))?;
    Ok((target, function))
}

fn subscribe_renders(ports: &JsValue, port: &str, bridge: Rc<Bridge>) -> Result<(), JsValue> {
    let (target, subscribe) = port_method(ports, port, "subscribe")?;
    let on_message = Closure::<dyn FnMut(JsValue)>::new(move |message: JsValue| {
        let text = match JSON::stringify(&message) {
            Ok(text) => String::from(text),
            Err(err) => {
                log::error!("port message is not JSON: {err:?}");
                return;
            }
        };
        match bridge.dispatch(&text) {
            Ok(Some(task)) => spawn_local(report(task)),
            Ok(None) => {}
            Err(err) => log::error!("{err}"),
        }
    });
    subscribe.call1(&target, on_message.as_ref())?;
    // The port keeps calling it for the life of the page.
    on_message.forget();
    Ok(())
}

fn forward_touches(window: &Window, ports: &JsValue, port: &str) -> Result<(), JsValue> {
    let (target, send) = port_method(ports, port, "send")?;
    let input = Rc::new(RefCell::new(InputForwarder::new(move |v: StickVector| {
        let sent = serde_json::to_string(&v)
            .map_err(js_error)
            .and_then(|text| JSON::parse(&text))
            .and_then(|value| send.call1(&target, &value));
        if let Err(err) = sent {
            log::error!("sending stick vector failed: {err:?}");
        }
    })));

    let forwarder = Rc::clone(&input);
    listen(window, "touchstart", move |event| {
        if let Some(pos) = first_touch(event) {
            forwarder.borrow_mut().touch_start(pos);
        }
    })?;
    let forwarder = Rc::clone(&input);
    listen(window, "touchmove", move |event| {
        if let Some(pos) = first_touch(event) {
            forwarder.borrow_mut().touch_move(pos);
        }
    })?;
    let forwarder = Rc::clone(&input);
    listen(window, "touchend", move |_| forwarder.borrow_mut().touch_end())?;
    listen(window, "touchcancel", move |_| input.borrow_mut().touch_cancel())?;
    Ok(())
}

fn first_touch(event: &TouchEvent) -> Option<Point> {
    let touch = event.touches().item(0)?;
    Some(Point::new(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    ))
}

fn listen(
    window: &Window,
    kind: &str,
    mut handler: impl FnMut(&TouchEvent) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| handler(&event));
    window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
