use ratatui::Frame;

use sentui::logic::stats;
use sentui::model::Screen;

use super::{auth, dashboard, demo, dialogs, filter_panel, layout, legend, review_table, status_bar, toast};
use crate::App;

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let model = &app.model;

    match model.ui.screen {
        Screen::Login => auth::render_auth_form(f, &model.ui.auth_form, false),
        Screen::Register => auth::render_auth_form(f, &model.ui.auth_form, true),
        Screen::Demo => demo::render_demo(f, &model.ui.demo),
        Screen::Dashboard => render_dashboard(f, app),
    }

    // Render toast notification if active
    if let Some((message, _timestamp)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}

fn render_dashboard(f: &mut Frame, app: &App) {
    let model = &app.model;
    let panel_open = model.filters.is_panel_open();

    let legend_height = legend::calculate_legend_height(f.area().width, model.ui.vim_mode, panel_open);
    let layout_info = layout::calculate_dashboard_layout(f.area(), legend_height);

    // Stats always reflect the whole report, not the filtered view
    let totals = stats::tonality_totals(&model.reports.reviews);

    dashboard::render_header(f, layout_info.header_area, model);
    dashboard::render_stat_cards(f, layout_info.cards_area, &totals);
    dashboard::render_chart(f, layout_info.chart_area, &totals);

    if model.reports.is_empty_state() || (model.reports.is_loading && model.reports.reviews.is_empty()) {
        dashboard::render_empty_state(f, layout_info.table_area, model.reports.is_loading);
    } else {
        review_table::render_review_table(
            f,
            layout_info.table_area,
            &model.visible_reviews(),
            &model.filters,
            &model.ui.expanded_rows,
            model.ui.table_selection,
        );
    }

    legend::render_legend(
        f,
        layout_info.legend_area,
        model.ui.vim_mode,
        panel_open,
        model.reports.can_export(),
        model.reports.can_delete(),
    );
    status_bar::render_status_bar(f, layout_info.status_area, model);

    if panel_open {
        let sections = model.filters.panel_sections(&model.reports.source_options);
        filter_panel::render_filter_panel(
            f,
            model.filters.panel_title(),
            &sections,
            model.ui.filter_cursor,
        );
    }

    if let Some(cursor) = model.ui.version_picker {
        dialogs::render_version_picker(
            f,
            &model.version_options(),
            &model.reports.selected_version_id,
            cursor,
        );
    }

    if let Some(form) = &model.ui.import_dialog {
        dialogs::render_import_dialog(f, form);
    }

    if let Some(dialog) = &model.ui.metrics_dialog {
        dialogs::render_metrics_dialog(f, dialog);
    }

    if let Some((_report_id, label)) = &model.ui.confirm_delete {
        dialogs::render_delete_confirmation(f, label);
    }
}
