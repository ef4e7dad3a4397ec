use gloo_console::info;
use gloo_utils::document;
use leaflet::{
    LatLng, Map, MapOptions, Marker, MouseEvent as MapMouseEvent, Popup, PopupOptions, TileLayer, TileLayerOptions,
    ZoomPanOptions,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Node};
use workout_tracker_lib::{Coords, MapService, MarkerPopup, TrackerConfig};
use yew::prelude::*;

/// Leaflet map living in its own detached `div`, mounted into the page by [`LeafletMap::render`].
pub struct LeafletMap {
    map: Map,
    container: HtmlElement,
}

impl LeafletMap {
    pub fn new(config: &TrackerConfig) -> Result<Self, JsValue> {
        let container: HtmlElement = document().create_element("div")?.dyn_into()?;
        container.set_id("map");

        let map = Map::new_with_element(&container, &MapOptions::default());
        add_tile_layer(&map, config);

        Ok(Self { map, container })
    }

    /// Clicks are reported with the longitude wrapped into [-180, 180], the map itself
    /// reports unwrapped positions once panned across the antimeridian.
    pub fn on_click(&self, callback: Callback<Coords>) {
        self.map.on_mouse_click(Box::new(move |event: MapMouseEvent| {
            let at = event.lat_lng().wrap();
            callback.emit(Coords::new(at.lat(), at.lng()));
        }));
    }

    pub fn invalidate_size(&self) {
        self.map.invalidate_size(false);
    }

    pub fn render(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }
}

impl MapService for LeafletMap {
    fn set_view(&mut self, center: Coords, zoom: f64) {
        self.map.invalidate_size(false);
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn add_marker(&mut self, at: Coords, popup: &MarkerPopup) {
        info!(format!("Adding marker at {:?}", at));
        let marker = Marker::new(&lat_lng(at));
        marker.add_to(&self.map);
        marker.bind_popup(&make_popup(popup));

        if popup.open {
            marker.open_popup();
        }
    }

    fn pan_to(&mut self, center: Coords, zoom: f64, duration_secs: f64) {
        let options = ZoomPanOptions::default();
        options.set_animate(true);
        options.set_duration(duration_secs);
        self.map.set_view_with_options(&lat_lng(center), zoom, &options);
    }
}

fn lat_lng(coords: Coords) -> LatLng {
    LatLng::new(coords.lat(), coords.lng())
}

fn make_popup(popup: &MarkerPopup) -> Popup {
    let opts = PopupOptions::default();
    opts.set_max_width(popup.max_width);
    opts.set_min_width(popup.min_width);
    opts.set_auto_close(popup.auto_close);
    opts.set_close_on_click(popup.close_on_click);
    if !popup.class_name.is_empty() {
        opts.set_class_name(popup.class_name.clone());
    }

    let leaflet_popup = Popup::new(&opts, None);
    leaflet_popup.set_content(&popup.content.as_str().into());
    leaflet_popup
}

fn add_tile_layer(map: &Map, config: &TrackerConfig) {
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    opts.set_attribution(config.tile_attribution.clone());
    TileLayer::new_options(&config.tile_url, &opts).add_to(map);
}
