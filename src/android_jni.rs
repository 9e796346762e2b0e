//! JNI entry points for an Android host of the routing core.
//!
//! The host loads canal segments once through `loadNetwork`, which returns
//! an opaque `long` handle owning the parsed network, and releases it with
//! `freeNetwork`. Queries take the handle plus raw coordinates and answer
//! with JSON strings; failures come back as `{"error": "..."}` instead of
//! a Java exception.

use jni::JNIEnv;
use jni::objects::{JClass, JString};
use jni::sys::{jdouble, jlong, jstring};
use serde::Serialize;

use crate::network::{load_network_json, Coordinate, PolylineNetwork};
use crate::route::extract_route;

fn to_jstring(env: &JNIEnv, value: &str) -> jstring {
    match env.new_string(value) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            log::error!("failed to create Java string: {e}");
            std::ptr::null_mut()
        }
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&e.to_string()))
}

/// Borrow the network behind a handle returned by `loadNetwork`.
///
/// # Safety
/// `handle` must be 0 or a live handle from `loadNetwork`.
unsafe fn network_ref<'a>(handle: jlong) -> Option<&'a PolylineNetwork> {
    (handle as *const PolylineNetwork).as_ref()
}

/// Returns the core library version.
/// Maps to: RustBridge.version() -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_paddle_app_RustBridge_version(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    to_jstring(&env, crate::VERSION)
}

/// Installs the Android logger. Safe to call more than once.
/// Maps to: RustBridge.init()
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_paddle_app_RustBridge_init(_env: JNIEnv, _class: JClass) {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag("paddle"),
    );
}

/// Parses canal segment JSON and returns an opaque network handle,
/// or 0 on failure.
/// Maps to: RustBridge.loadNetwork(json: String) -> Long
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_paddle_app_RustBridge_loadNetwork(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jlong {
    let json: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => {
            log::error!("failed to read network JSON: {e}");
            return 0;
        }
    };

    match load_network_json(json.as_bytes()) {
        Ok(network) => Box::into_raw(Box::new(network)) as jlong,
        Err(e) => {
            log::error!("failed to load network: {e}");
            0
        }
    }
}

/// Releases a handle from `loadNetwork`.
/// Maps to: RustBridge.freeNetwork(handle: Long)
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_paddle_app_RustBridge_freeNetwork(
    _env: JNIEnv,
    _class: JClass,
    handle: jlong,
) {
    if handle != 0 {
        // SAFETY: the handle was created by Box::into_raw in loadNetwork
        // and the Kotlin side frees it exactly once.
        drop(unsafe { Box::from_raw(handle as *mut PolylineNetwork) });
    }
}

/// Route between two points as `{"coords": [...], "distance_m": n}`.
/// Maps to: RustBridge.extractRoute(handle, startLat, startLon, endLat, endLon) -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_paddle_app_RustBridge_extractRoute(
    env: JNIEnv,
    _class: JClass,
    handle: jlong,
    start_lat: jdouble,
    start_lon: jdouble,
    end_lat: jdouble,
    end_lon: jdouble,
) -> jstring {
    // SAFETY: the Kotlin side only passes handles from loadNetwork.
    let Some(network) = (unsafe { network_ref(handle) }) else {
        return to_jstring(&env, &error_json("invalid network handle"));
    };

    let start = Coordinate::new(start_lat, start_lon);
    let end = Coordinate::new(end_lat, end_lon);
    let body = match extract_route(start, end, network) {
        Ok(route) => to_json(&route),
        Err(e) => error_json(&e.to_string()),
    };
    to_jstring(&env, &body)
}

/// Waterway nearest a tap as `{"name": ..., "distance_m": n}`, or
/// `{"name": null}` when nothing is close enough.
/// Maps to: RustBridge.selectCanal(handle, lat, lon) -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_paddle_app_RustBridge_selectCanal(
    env: JNIEnv,
    _class: JClass,
    handle: jlong,
    lat: jdouble,
    lon: jdouble,
) -> jstring {
    // SAFETY: the Kotlin side only passes handles from loadNetwork.
    let Some(network) = (unsafe { network_ref(handle) }) else {
        return to_jstring(&env, &error_json("invalid network handle"));
    };

    let body = match network.select_closest_canal(Coordinate::new(lat, lon)) {
        Some(name) => serde_json::json!({
            "name": name,
            "distance_m": network.canal_length(name),
        }),
        None => serde_json::json!({ "name": null }),
    };
    to_jstring(&env, &body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_json_is_an_object() {
        let parsed: serde_json::Value = serde_json::from_str(&error_json("boom")).unwrap();
        assert_eq!(parsed["error"], "boom");
    }

    #[test]
    fn route_json_shape() {
        let network = load_network_json(
            br#"[{"name": "X", "coords": [[0.0, 0.0], [0.0, 0.001]]}]"#,
        )
        .unwrap();
        let route = extract_route(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.001), &network)
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&to_json(&route)).unwrap();

        assert_eq!(parsed["coords"].as_array().map(Vec::len), Some(2));
        assert_eq!(parsed["coords"][1]["lon"], 0.001);
        assert!(parsed["distance_m"].as_f64().unwrap() > 100.0);
    }

    #[test]
    fn null_handle_is_rejected() {
        assert!(unsafe { network_ref(0) }.is_none());
    }
}
