/// WGSL shader for every object in the room: textured Phong shading with the
/// sun and the flashlight.
pub const SCENE_SHADER: &str = r#"
struct DirLight {
    direction: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
};

struct SpotLight {
    position: vec4<f32>,
    direction: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    // constant, linear, quadratic, unused
    attenuation: vec4<f32>,
    // cut_off, outer_cut_off, enabled, unused
    cone: vec4<f32>,
};

struct Frame {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    // xyz position, w shininess
    view_position: vec4<f32>,
    dir_light: DirLight,
    spot_light: SpotLight,
};

struct Object {
    model: mat4x4<f32>,
    normal: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> frame: Frame;

@group(1) @binding(0)
var<uniform> object: Object;

@group(2) @binding(0)
var diffuse_texture: texture_2d<f32>;
@group(2) @binding(1)
var diffuse_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = object.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = frame.projection * frame.view * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = (object.normal * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv;
    return out;
}

fn dir_light_color(light: DirLight, normal: vec3<f32>, view_dir: vec3<f32>, color: vec3<f32>, shininess: f32) -> vec3<f32> {
    let ambient = light.ambient.xyz * color;
    // night: no sun direction
    if (dot(light.direction.xyz, light.direction.xyz) < 1e-8) {
        return ambient;
    }
    let light_dir = normalize(-light.direction.xyz);
    let diff = max(dot(normal, light_dir), 0.0);
    let reflect_dir = reflect(-light_dir, normal);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), shininess);
    return ambient + light.diffuse.xyz * diff * color + light.specular.xyz * spec * color;
}

fn spot_light_color(light: SpotLight, normal: vec3<f32>, frag_pos: vec3<f32>, view_dir: vec3<f32>, color: vec3<f32>, shininess: f32) -> vec3<f32> {
    let to_light = light.position.xyz - frag_pos;
    let distance = length(to_light);
    let light_dir = to_light / max(distance, 1e-4);
    let diff = max(dot(normal, light_dir), 0.0);
    let reflect_dir = reflect(-light_dir, normal);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), shininess);

    let a = light.attenuation;
    let attenuation = 1.0 / (a.x + a.y * distance + a.z * distance * distance);

    let theta = dot(light_dir, normalize(-light.direction.xyz));
    let epsilon = light.cone.x - light.cone.y;
    let intensity = clamp((theta - light.cone.y) / epsilon, 0.0, 1.0);

    let ambient = light.ambient.xyz * color;
    let diffuse = light.diffuse.xyz * diff * color;
    let specular = light.specular.xyz * spec * color;
    return (ambient + diffuse + specular) * attenuation * intensity;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(diffuse_texture, diffuse_sampler, in.uv);
    if (texel.a < 0.1) {
        discard;
    }

    let normal = normalize(in.world_normal);
    let view_dir = normalize(frame.view_position.xyz - in.world_position);
    let shininess = frame.view_position.w;

    var color = dir_light_color(frame.dir_light, normal, view_dir, texel.rgb, shininess);
    if (frame.spot_light.cone.z > 0.5) {
        color += spot_light_color(frame.spot_light, normal, in.world_position, view_dir, texel.rgb, shininess);
    }
    return vec4<f32>(color, texel.a);
}
"#;
