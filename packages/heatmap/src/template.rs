//! Embedded HTML template for the static map document.
//!
//! `__MARKERS__` is replaced with a JSON array of marker objects before
//! the document is written. Leaflet and the markercluster plugin load
//! from CDN so the output file stays small and self-contained.

/// The static map document. Substitute `__MARKERS__` before writing.
pub const MAP_HTML: &str = r##"<!doctype html>
<html lang="en">

<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Greater Vancouver Crime Map</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous"
    referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"
    referrerpolicy="no-referrer"></script>

  <!-- Leaflet.markercluster 1.4.1 -->
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.css" />
  <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.Default.css" />
  <script src="https://unpkg.com/leaflet.markercluster@1.4.1/dist/leaflet.markercluster.js"></script>

  <style>
    html,
    body {
      height: 100%;
      margin: 0;
    }

    #map {
      height: 100%;
      width: 100%;
    }
  </style>
</head>

<body>
  <div id="map"></div>
  <script>
    const markers = __MARKERS__;

    const map = L.map('map').setView([49.25, -123.12], 11);
    L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
      attribution: '&copy; OpenStreetMap contributors &copy; CARTO',
      maxZoom: 19,
    }).addTo(map);

    const cluster = L.markerClusterGroup({
      spiderfyOnMaxZoom: false,
      showCoverageOnHover: true,
    });

    for (const m of markers) {
      const marker = L.circleMarker([m.lat, m.lon], {
        radius: m.radius,
        color: m.color,
        fill: true,
        fillOpacity: 0.7,
      });
      marker.bindPopup(`Count: ${m.count}<br>Severity: ${m.severity}`, { maxWidth: 250 });
      cluster.addLayer(marker);
    }

    map.addLayer(cluster);
    L.control.layers(null, { 'Crimes': cluster }).addTo(map);
  </script>
</body>

</html>
"##;
