use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::Theme;
use crate::data::filter::Selection;
use crate::data::model::Period;
use crate::state::{AppState, Tab};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            if ui.button("Abrir…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(source) = &state.source {
            ui.label(source.display().to_string());
        }

        if state.is_ready() {
            ui.label(RichText::new("Datos cargados correctamente").color(Color32::DARK_GREEN));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter selectors
// ---------------------------------------------------------------------------

/// Render the three filter selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros de análisis");
    ui.separator();

    if !state.is_ready() {
        ui.label("Sin datos cargados.");
        return;
    }

    // Clone what we need so we can mutate state inside the combo boxes.
    let years = state.year_options.clone();
    let entities = state.entity_options.clone();

    ui.strong("Selecciona un año");
    let current = state.filters.year.clone();
    egui::ComboBox::from_id_salt("year")
        .selected_text(current.year_label())
        .show_ui(ui, |ui: &mut Ui| {
            for option in years {
                let label = option.year_label();
                if ui.selectable_label(current == option, label).clicked() {
                    state.set_year(option);
                }
            }
        });
    ui.add_space(8.0);

    ui.strong("Selecciona una entidad");
    let current = state.filters.entity.clone();
    egui::ComboBox::from_id_salt("entity")
        .selected_text(current.entity_label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in entities {
                let label = option.entity_label().to_string();
                if ui.selectable_label(current == option, label).clicked() {
                    state.set_entity(option);
                }
            }
        });
    ui.add_space(8.0);

    ui.strong("Selecciona un periodo");
    let current = state.filters.period;
    egui::ComboBox::from_id_salt("period")
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for option in Period::options() {
                if ui
                    .selectable_label(current == option, option.to_string())
                    .clicked()
                {
                    state.set_period(option);
                }
            }
        });

    ui.add_space(8.0);
    if ui.small_button("Restablecer filtros").clicked() {
        state.set_year(Selection::All);
        state.set_entity(Selection::All);
        state.set_period(Period::AnnualTotal);
    }
}

// ---------------------------------------------------------------------------
// Central panel – metrics, note, tabs
// ---------------------------------------------------------------------------

/// Render the dashboard body, or only the load error when there is one.
pub fn dashboard(ui: &mut Ui, state: &mut AppState, theme: &Theme) {
    ui.heading(RichText::new("Delitos estatales en México").color(theme.text));

    if let Some(msg) = &state.status_message {
        ui.label(RichText::new(msg).color(Color32::RED));
        return;
    }
    let (Some(summary), Some(view)) = (state.summary, state.view.as_ref()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Abre un archivo para ver los datos  (Archivo → Abrir…)");
        });
        return;
    };

    ui.add_space(6.0);
    ui.strong("Métricas generales");
    ui.columns(3, |cols| {
        metric(&mut cols[0], "Registros analizados", &summary.records_label());
        metric(&mut cols[1], "Delitos totales registrados", &summary.total_label());
        metric(&mut cols[2], "Delitos promedio por registro", &summary.mean_label());
    });
    ui.separator();

    if let Some(note) = &view.note {
        ui.label(RichText::new(note).italics().small());
    }

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
    ui.separator();

    plot::themed_frame(theme).show(ui, |ui: &mut Ui| match state.tab {
        Tab::Temporal => plot::monthly_trend(ui, &view.temporal, theme),
        Tab::CrimeTypes => plot::ranking_chart(ui, "crime_types", &view.crime_types, theme),
        Tab::Entities => plot::ranking_chart(ui, "entities", &view.entities, theme),
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Abrir datos de delitos")
        .add_filter("CSV", &["csv"])
        .add_filter("Texto delimitado", &["txt", "tsv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
