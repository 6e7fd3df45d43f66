//! Fixed choice lists offered by the entity forms.
//!
//! Dynamic lists (known materials, items, sounds) are not here; they arrive
//! through `OptionLists`.

pub const ITEM_TYPES: &[&str] = &[
    "generic", "sword", "shovel", "pickaxe", "axe", "hoe", "armor", "elytra", "trident",
];

/// Item types that show the tool tab.
pub const TOOL_TYPES: &[&str] = &["sword", "shovel", "pickaxe", "axe", "hoe"];

pub const ARMOR_TYPES: &[&str] = &["helmet", "chestplate", "leggings", "boots"];

pub const RARITIES: &[&str] = &["common", "uncommon", "rare", "epic"];

pub const BLOCK_TYPES: &[&str] = &["regular", "tnt"];

pub const BLOCK_REGISTRIES: &[&str] = &["note_block", "mushroom", "tripwire"];

pub const BLOCK_DROP_TYPES: &[&str] = &["self", "ore"];

pub const BLOCK_REQUIRED_MATERIALS: &[&str] = &["none", "wood", "stone", "iron", "diamond"];

pub const BLOCK_TOOL_TYPES: &[&str] = &["pickaxe", "axe", "shovel", "hoe", "sword"];

pub const BASE_MATERIALS: &[&str] = &[
    "WOOD",
    "STONE",
    "COPPER",
    "IRON",
    "DIAMOND",
    "GOLD",
    "NETHERITE",
];

/// Minecraft language codes accepted as keys of a localized name map.
pub const LANGUAGES: &[&str] = &[
    "af_za", "ar_sa", "ast_es", "az_az", "ba_ru", "bar", "be_by", "be_latn", "bg_bg", "br_fr",
    "brb", "bs_ba", "ca_es", "cs_cz", "cy_gb", "da_dk", "de_at", "de_ch", "de_de", "el_gr",
    "en_au", "en_ca", "en_gb", "en_nz", "en_pt", "en_ud", "en_us", "enp", "enws", "eo_uy",
    "es_ar", "es_cl", "es_ec", "es_es", "es_mx", "es_uy", "es_ve", "esan", "et_ee", "eu_es",
    "fa_ir", "fi_fi", "fil_ph", "fo_fo", "fr_ca", "fr_fr", "fra_de", "fur_it", "fy_nl", "ga_ie",
    "gd_gb", "gl_es", "hal_ua", "haw_us", "he_il", "hi_in", "hn_no", "hr_hr", "hu_hu", "hy_am",
    "id_id", "ig_ng", "io_en", "is_is", "isv", "it_it", "ja_jp", "jbo_en", "ka_ge", "kk_kz",
    "kn_in", "ko_kr", "ksh", "kw_gb", "ky_kg", "la_la", "lb_lu", "li_li", "lmo", "lo_la",
    "lol_us", "lt_lt", "lv_lv", "lzh", "mk_mk", "mn_mn", "ms_my", "mt_mt", "nah", "nds_de",
    "nl_be", "nl_nl", "nn_no", "no_no", "oc_fr", "ovd", "pl_pl", "pls", "pt_br", "pt_pt",
    "qcb_es", "qid", "qya_aa", "ro_ro", "rpr", "ru_ru", "ry_ua", "sah_sah", "se_no", "sk_sk",
    "sl_si", "so_so", "sq_al", "sr_cs", "sr_sp", "sv_se", "sxu", "szl", "ta_in", "th_th", "tl_ph",
    "tlh_aa", "tok", "tr_tr", "tt_ru", "tzo_mx", "uk_ua", "val_es", "vec_it", "vi_vn", "vp_vl",
    "yi_de", "yo_ng", "zh_cn", "zh_hk", "zh_tw", "zlm_arab",
];

pub fn is_language(code: &str) -> bool {
    LANGUAGES.contains(&code)
}
