use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{GeolocationPosition, GeolocationPositionError};
use workout_tracker_lib::Coords;
use yew::Callback;

use crate::util::js_error_message;

/// Asks the browser for the current position once. Exactly one of the callbacks fires.
pub fn request_position(on_success: Callback<Coords>, on_error: Callback<String>) {
    let geolocation = match gloo_utils::window().navigator().geolocation() {
        Ok(geolocation) => geolocation,
        Err(err) => {
            on_error.emit(js_error_message(&err));
            return;
        }
    };

    let success = Closure::once_into_js(move |position: GeolocationPosition| {
        let coords = position.coords();
        on_success.emit(Coords::new(coords.latitude(), coords.longitude()));
    });

    let failed = on_error.clone();
    let failure = Closure::once_into_js(move |err: GeolocationPositionError| failed.emit(err.message()));

    if let Err(err) = geolocation.get_current_position_with_error_callback(success.unchecked_ref(), Some(failure.unchecked_ref())) {
        on_error.emit(js_error_message(&err));
    }
}
